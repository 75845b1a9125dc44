//! Axum route handlers for job search and the jobs page.

use askama::Template;
use axum::{extract::State, response::Html, Json};

use crate::errors::AppError;
use crate::models::job::JobListing;
use crate::search::board::{ApplicationStatus, BoardSnapshot};
use crate::search::{SearchError, SEARCH_FAILED_MESSAGE};
use crate::state::AppState;

struct ListingView<'a> {
    job: &'a JobListing,
    status: ApplicationStatus,
}

impl ListingView<'_> {
    fn button_label(&self) -> &'static str {
        match self.status {
            ApplicationStatus::Applying => "Applying...",
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::NotApplied if self.job.email.is_some() => "Apply via Email",
            ApplicationStatus::NotApplied => "Apply on Site",
        }
    }

    fn disabled(&self) -> bool {
        self.status != ApplicationStatus::NotApplied
    }
}

#[derive(Template)]
#[template(path = "jobs.html")]
struct JobsPage<'a> {
    loading: bool,
    error: Option<&'a str>,
    listings: Vec<ListingView<'a>>,
    notices: Vec<String>,
}

/// GET /jobs
///
/// Renders current results. Queued notices are shown here once and dropped.
pub async fn handle_jobs_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.jobs.snapshot();
    let notices = state.jobs.drain_notices();

    let page = JobsPage {
        loading: snapshot.loading,
        error: snapshot.error.as_deref(),
        listings: snapshot
            .jobs
            .iter()
            .map(|job| ListingView {
                job,
                status: snapshot.status_of(&job.id),
            })
            .collect(),
        notices,
    };
    Ok(Html(page.render()?))
}

/// GET /api/jobs
pub async fn handle_get_jobs(State(state): State<AppState>) -> Json<BoardSnapshot> {
    Json(state.jobs.snapshot())
}

/// POST /api/jobs/search
///
/// Runs one search against the current resume. Refused with 409 while
/// another search is pending. The search runs on its own task so a dropped
/// request cannot leave `loading` stuck.
pub async fn handle_search(State(state): State<AppState>) -> Result<Json<BoardSnapshot>, AppError> {
    let resume = state.store.current()?;
    state.jobs.begin_search()?;

    let board = state.jobs.clone();
    let searcher = state.searcher.clone();
    let joined = tokio::spawn(async move {
        let result = searcher.search(&resume).await;
        let succeeded = result.is_ok();
        board.finish_search(result);
        succeeded
    })
    .await;

    let succeeded = match joined {
        Ok(succeeded) => succeeded,
        Err(e) => {
            state.jobs.finish_search(Err(SearchError::Aborted(e.to_string())));
            false
        }
    };

    if !succeeded {
        return Err(AppError::Search(SEARCH_FAILED_MESSAGE.to_string()));
    }
    Ok(Json(state.jobs.snapshot()))
}
