//! Session-only job board: the latest search results plus per-listing
//! application state. Everything here resets on restart.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::job::JobListing;
use crate::search::{SearchError, SEARCH_FAILED_MESSAGE};

#[derive(Debug, Error, PartialEq)]
pub enum BoardError {
    #[error("A job search is already in progress")]
    SearchInFlight,

    #[error("Listing {0} not found")]
    UnknownListing(String),

    #[error("Listing {0} was already applied to")]
    AlreadyApplied(String),

    #[error("An application for listing {0} is already in progress")]
    AlreadyApplying(String),
}

/// Where one listing stands in the apply flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    NotApplied,
    Applying,
    Applied,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub loading: bool,
    pub jobs: Vec<JobListing>,
    pub error: Option<String>,
    pub applied: BTreeSet<String>,
    pub applying: BTreeSet<String>,
    pub notices: Vec<String>,
}

impl BoardSnapshot {
    pub fn status_of(&self, id: &str) -> ApplicationStatus {
        if self.applied.contains(id) {
            ApplicationStatus::Applied
        } else if self.applying.contains(id) {
            ApplicationStatus::Applying
        } else {
            ApplicationStatus::NotApplied
        }
    }
}

#[derive(Debug, Default)]
struct BoardState {
    loading: bool,
    jobs: Vec<JobListing>,
    error: Option<String>,
    applied: BTreeSet<String>,
    applying: BTreeSet<String>,
    notices: Vec<String>,
}

#[derive(Debug, Default)]
pub struct JobBoard {
    state: Mutex<BoardState>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        // State stays consistent across a panicking holder: every write is a
        // single field assignment.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets `loading`, refusing if a search is already pending.
    pub fn begin_search(&self) -> Result<(), BoardError> {
        let mut state = self.lock();
        if state.loading {
            return Err(BoardError::SearchInFlight);
        }
        state.loading = true;
        state.error = None;
        Ok(())
    }

    /// Records the search result and clears `loading`. On failure the previous
    /// listings stay visible alongside the error message.
    pub fn finish_search(&self, result: Result<Vec<JobListing>, SearchError>) {
        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(jobs) => {
                state.jobs = jobs;
                state.error = None;
            }
            Err(e) => {
                error!("Job search failed: {e}");
                state.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    pub fn listing(&self, id: &str) -> Result<JobListing, BoardError> {
        self.lock()
            .jobs
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or_else(|| BoardError::UnknownListing(id.to_string()))
    }

    /// Marks a listing `applying`. Applied or applying listings are refused.
    pub fn begin_apply(&self, id: &str) -> Result<(), BoardError> {
        let mut state = self.lock();
        if state.applied.contains(id) {
            return Err(BoardError::AlreadyApplied(id.to_string()));
        }
        if !state.applying.insert(id.to_string()) {
            return Err(BoardError::AlreadyApplying(id.to_string()));
        }
        Ok(())
    }

    /// Clears `applying`; marks `applied` on success, otherwise queues the
    /// notice for the user.
    pub fn finish_apply(&self, id: &str, outcome: Result<(), String>) {
        let mut state = self.lock();
        state.applying.remove(id);
        match outcome {
            Ok(()) => {
                state.applied.insert(id.to_string());
            }
            Err(notice) => state.notices.push(notice),
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let state = self.lock();
        BoardSnapshot {
            loading: state.loading,
            jobs: state.jobs.clone(),
            error: state.error.clone(),
            applied: state.applied.clone(),
            applying: state.applying.clone(),
            notices: state.notices.clone(),
        }
    }

    /// Returns and forgets queued notices, so each is shown once.
    pub fn drain_notices(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().notices)
    }
}
