//! HTTP server setup using Axum.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use studymate_core::TopicCatalog;
use studymate_core::error::{Result, StudyMateError};
use studymate_retrieval::ChatPipeline;

/// Shared state for the gateway.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<TopicCatalog>,
    pub pipeline: Arc<ChatPipeline>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(catalog: Arc<TopicCatalog>, pipeline: Arc<ChatPipeline>) -> Self {
        Self { catalog, pipeline, start_time: Instant::now() }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    // The single-page client is served from a different origin in dev.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(super::routes::health))
        .route("/api/materials", get(super::routes::materials))
        .route("/api/chat", post(super::routes::chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped.
pub async fn run(state: AppState, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StudyMateError::Config(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("gateway listening on http://{addr}");
    tracing::info!("  GET  /api/health");
    tracing::info!("  GET  /api/materials");
    tracing::info!("  POST /api/chat");

    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| StudyMateError::Config(format!("server error: {e}")))?;
    Ok(())
}
