//! The single inspection entry point.
//!
//! The HTTP handler, the CLI and host lifecycle-event callers all come
//! through `run_inspection`: one synchronous call in, one serialized
//! envelope out. Nothing is cached between calls.

use crate::request::InspectionRequest;
use record_projection::{
    ComparisonResponse, ProjectionPolicy, ProjectionResponse, RecordProjector, RecordSource,
};
use serde::Serialize;

/// Result of one inspection: a projection or a comparison envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InspectionOutcome {
    Projection(ProjectionResponse),
    Comparison(ComparisonResponse),
}

impl InspectionOutcome {
    pub fn success(&self) -> bool {
        match self {
            Self::Projection(response) => response.success,
            Self::Comparison(response) => response.success,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        let error = match self {
            Self::Projection(response) => response.error.as_ref(),
            Self::Comparison(response) => response.error.as_ref(),
        };
        error.map(|body| body.message.as_str())
    }
}

/// Run one inspection against the host source.
///
/// `compare_id` present routes to the comparator, otherwise a single
/// projection. The request's allow-lists narrow the base policy.
pub fn run_inspection<S>(
    source: &S,
    base_policy: &ProjectionPolicy,
    request: &InspectionRequest,
) -> InspectionOutcome
where
    S: RecordSource + ?Sized,
{
    let projector = RecordProjector::new(request.policy(base_policy));
    match &request.compare_id {
        Some(compare_id) => InspectionOutcome::Comparison(projector.compare(
            source,
            &request.record_type,
            &request.record_id,
            compare_id,
        )),
        None => InspectionOutcome::Projection(projector.project(
            source,
            &request.record_type,
            &request.record_id,
        )),
    }
}
