use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "hireclip-api",
        "model_configured": state.config.gemini_api_key.is_some(),
    }))
}

/// GET /api/
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}
