use std::sync::Arc;

use record_inspector::api::{create_router, AppState};
use record_inspector::FixtureRecordSource;
use record_projection::{ProjectionPolicy, DEFAULT_MAX_SUBLIST_LINES};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "record_inspector=info,tower_http=debug".to_string()),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let fixture_path =
        std::env::var("FIXTURE_PATH").unwrap_or_else(|_| "fixtures/records.json".to_string());
    info!("Loading record fixtures from {}", fixture_path);
    let source = Arc::new(FixtureRecordSource::from_path(&fixture_path)?);
    info!("Serving {} fixture record(s)", source.record_count());

    let max_lines = std::env::var("MAX_SUBLIST_LINES")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_MAX_SUBLIST_LINES);
    let policy = ProjectionPolicy::default().with_max_sublist_lines(max_lines);

    let state = AppState { source, policy };
    let app = create_router(state);

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting inspector server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
