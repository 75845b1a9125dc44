// Application Dispatcher — applies to one listing either by pointing the
// user at its URL or by emailing the rendered resume through the relay.

pub mod handlers;

use askama::Template;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::models::job::JobListing;
use crate::relay::SendResumeRequest;
use crate::search::board::{BoardError, JobBoard};

/// Notification shown when an email application fails.
pub const APPLY_FAILED_MESSAGE: &str =
    "Failed to send resume. Make sure RESEND_API_KEY is configured.";

#[derive(Debug, Error)]
pub enum RelayCallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay returned status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("Could not compose application email: {0}")]
    Compose(#[from] askama::Error),

    #[error("Email application failed: {0}")]
    Relay(#[from] RelayCallError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The caller should open `url` in a new browsing context.
    OpenUrl { url: String },
    Applied,
}

/// Reaches the Email Relay Service. Carried in `AppState` as
/// `Arc<dyn ResumeRelay>`.
#[async_trait]
pub trait ResumeRelay: Send + Sync {
    async fn send_resume(&self, request: &SendResumeRequest) -> Result<(), RelayCallError>;
}

/// Calls `POST {base_url}/api/send-resume` over HTTP.
pub struct HttpRelay {
    client: Client,
    base_url: String,
}

impl HttpRelay {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ResumeRelay for HttpRelay {
    async fn send_resume(&self, request: &SendResumeRequest) -> Result<(), RelayCallError> {
        let response = self
            .client
            .post(format!("{}/api/send-resume", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayCallError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[derive(Template)]
#[template(path = "application_email.html")]
struct ApplicationEmail<'a> {
    title: &'a str,
    company: &'a str,
    resume_html: &'a str,
}

/// Wraps the rendered resume with a short greeting for the listing.
pub fn compose_application_email(
    listing: &JobListing,
    resume_html: &str,
) -> Result<String, askama::Error> {
    ApplicationEmail {
        title: &listing.title,
        company: &listing.company,
        resume_html,
    }
    .render()
}

/// Dispatches one listing.
///
/// Listings without an email are never marked: the caller gets the URL back.
/// Listings with an email go `applying` → `applied`, or back to not applied
/// with exactly one queued notice when the relay call fails.
pub async fn apply_to_listing(
    board: &JobBoard,
    relay: &dyn ResumeRelay,
    listing: &JobListing,
    resume_html: &str,
) -> Result<DispatchOutcome, DispatchError> {
    let Some(to) = listing.contact_email() else {
        info!("Listing {} has no email, opening {}", listing.id, listing.url);
        return Ok(DispatchOutcome::OpenUrl {
            url: listing.url.clone(),
        });
    };

    let html = compose_application_email(listing, resume_html)?;
    board.begin_apply(&listing.id)?;

    let request = SendResumeRequest {
        to: to.to_string(),
        subject: None,
        resume_html: html,
        job_title: listing.title.clone(),
    };

    match relay.send_resume(&request).await {
        Ok(()) => {
            info!("Applied to listing {} ({})", listing.id, listing.title);
            board.finish_apply(&listing.id, Ok(()));
            Ok(DispatchOutcome::Applied)
        }
        Err(e) => {
            error!("Applying to listing {} failed: {e}", listing.id);
            board.finish_apply(&listing.id, Err(APPLY_FAILED_MESSAGE.to_string()));
            Err(DispatchError::Relay(e))
        }
    }
}
