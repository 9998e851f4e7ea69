//! Route handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use super::server::AppState;

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "materials_loaded": !state.catalog.is_empty(),
    }))
}

/// Serve the full topic catalog.
pub async fn materials(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::to_value(state.catalog.as_ref()).unwrap_or_default())
}

/// Answer one study question. Validation lives here, not in the pipeline:
/// a missing or blank `message` is a 400; any pipeline failure is logged
/// and collapsed into one stable, generic 500 body.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let message = body["message"].as_str().unwrap_or("");
    if message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Message is required" })),
        );
    }

    match state.pipeline.answer(message).await {
        Ok(result) => {
            // The client reads the generation service's `response` field;
            // the rest of the raw body stays server-side.
            let answer = result
                .response
                .get("response")
                .cloned()
                .unwrap_or(Value::Null);
            (
                StatusCode::OK,
                Json(json!({ "response": answer, "context_used": result.context_used })),
            )
        }
        Err(err) => {
            tracing::error!(%err, "chat pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
        }
    }
}
