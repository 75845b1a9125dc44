use axum::{
    extract::{Path, State},
    Json,
};

use crate::dispatch::{apply_to_listing, DispatchOutcome};
use crate::errors::AppError;
use crate::render::render_preview;
use crate::state::AppState;

/// POST /api/jobs/:id/apply
///
/// Returns `{"outcome": "open_url", "url": ...}` for listings without an
/// email, `{"outcome": "applied"}` once the relay accepted the resume.
/// The dispatch runs on its own task so the `applying` marker is always
/// cleared, even if the client goes away.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DispatchOutcome>, AppError> {
    let listing = state.jobs.listing(&id)?;
    let resume_html = render_preview(&state.store.current()?)?;

    let board = state.jobs.clone();
    let relay = state.relay.clone();
    let outcome = tokio::spawn(async move {
        apply_to_listing(&board, relay.as_ref(), &listing, &resume_html).await
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("apply task failed: {e}")))??;

    Ok(Json(outcome))
}
