//! HTTP surface for the inspector.
//!
//! Thin by design: parse the query, call `run_inspection`, return the
//! envelope as JSON. Failures come back as structured `{success: false}`
//! bodies with HTTP 200 — the envelope, not the status code, is the
//! contract.

use crate::inspect::{run_inspection, InspectionOutcome};
use crate::request::InspectionRequest;
use crate::source::FixtureRecordSource;
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use record_projection::ProjectionPolicy;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<FixtureRecordSource>,
    pub policy: ProjectionPolicy,
}

#[derive(Debug, Deserialize)]
pub struct InspectQuery {
    pub recordtype: Option<String>,
    pub recordid: Option<String>,
    pub compareid: Option<String>,
    /// Accepted for caller compatibility; JSON is the only rendering here.
    #[allow(dead_code)]
    pub format: Option<String>,
    pub fields: Option<String>,
    pub sublists: Option<String>,
}

impl InspectQuery {
    fn into_request(self) -> InspectionRequest {
        let mut request = InspectionRequest::new(
            self.recordtype.unwrap_or_default(),
            self.recordid.unwrap_or_default(),
        );
        request.compare_id = self.compareid.filter(|id| !id.is_empty());
        request.fields = self.fields.as_deref().and_then(InspectionRequest::parse_list);
        request.sublists = self
            .sublists
            .as_deref()
            .and_then(InspectionRequest::parse_list);
        request
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/inspect", get(inspect))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({"success": true, "data": "OK"}))
}

async fn inspect(
    State(state): State<AppState>,
    Query(query): Query<InspectQuery>,
) -> Json<InspectionOutcome> {
    let request = query.into_request();
    let outcome = run_inspection(state.source.as_ref(), &state.policy, &request);
    if !outcome.success() {
        warn!(
            record_type = %request.record_type,
            record_id = %request.record_id,
            error = outcome.error_message().unwrap_or("unknown"),
            "inspection failed"
        );
    }
    Json(outcome)
}
