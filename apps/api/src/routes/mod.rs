pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dispatch::handlers as dispatch;
use crate::form::handlers as form;
use crate::relay::handlers as relay;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(form::handle_editor_page))
        .route("/preview", get(form::handle_preview_page))
        .route("/jobs", get(search::handle_jobs_page))
        // Resume API
        .route(
            "/api/resume",
            get(form::handle_get_resume).put(form::handle_replace_resume),
        )
        .route("/api/resume/actions", post(form::handle_apply_action))
        .route("/api/resume/preview", get(form::handle_preview_fragment))
        // Job search API
        .route("/api/jobs", get(search::handle_get_jobs))
        .route("/api/jobs/search", post(search::handle_search))
        .route("/api/jobs/:id/apply", post(dispatch::handle_apply))
        // Email relay
        .route("/api/send-resume", post(relay::handle_send_resume))
        .with_state(state)
}
