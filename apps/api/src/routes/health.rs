use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus which outbound providers are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-automator",
        "email_relay_configured": state.mailer.is_some(),
        "job_search_configured": state.config.gemini_api_key.is_some(),
    }))
}
