//! Axum route handlers for the resume editor and its JSON API.

use askama::Template;
use axum::{extract::State, response::Html, Json};
use tracing::debug;

use crate::errors::AppError;
use crate::form::FormAction;
use crate::models::resume::ResumeData;
use crate::render::{render_preview, render_preview_page};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "editor.html")]
struct EditorPage<'a> {
    resume: &'a ResumeData,
    skills_text: String,
    preview: String,
}

/// GET /
///
/// Editor form beside the live preview.
pub async fn handle_editor_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let resume = state.store.current()?;
    let page = EditorPage {
        skills_text: resume.skills.join(", "),
        preview: render_preview(&resume)?,
        resume: &resume,
    };
    Ok(Html(page.render()?))
}

/// GET /preview
///
/// Standalone printable resume.
pub async fn handle_preview_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let resume = state.store.current()?;
    Ok(Html(render_preview_page(&resume)?))
}

/// GET /api/resume/preview
pub async fn handle_preview_fragment(
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let resume = state.store.current()?;
    Ok(Html(render_preview(&resume)?))
}

/// GET /api/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Result<Json<ResumeData>, AppError> {
    Ok(Json(state.store.current()?))
}

/// PUT /api/resume
///
/// Replaces the whole draft, e.g. when importing a saved resume.
pub async fn handle_replace_resume(
    State(state): State<AppState>,
    Json(resume): Json<ResumeData>,
) -> Result<Json<ResumeData>, AppError> {
    Ok(Json(state.store.replace(resume)?))
}

/// POST /api/resume/actions
///
/// Applies one edit and returns the new draft.
pub async fn handle_apply_action(
    State(state): State<AppState>,
    Json(action): Json<FormAction>,
) -> Result<Json<ResumeData>, AppError> {
    debug!("Applying form action: {action:?}");
    Ok(Json(state.store.apply(action)?))
}
