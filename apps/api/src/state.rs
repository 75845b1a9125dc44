use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::ResumeRelay;
use crate::relay::EmailProvider;
use crate::search::board::JobBoard;
use crate::search::JobSearcher;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The one resume draft; mutated only through form actions.
    pub store: Arc<ResumeStore>,
    /// Search results and per-listing application state for this session.
    pub jobs: Arc<JobBoard>,
    pub searcher: Arc<dyn JobSearcher>,
    pub relay: Arc<dyn ResumeRelay>,
    /// `None` when RESEND_API_KEY is unset; the relay then fails closed.
    pub mailer: Option<Arc<dyn EmailProvider>>,
}
