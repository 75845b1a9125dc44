// Email Relay Service — forwards one send-resume request to Resend.

pub mod handlers;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

const RESEND_API_URL: &str = "https://api.resend.com/emails";
/// Every relayed email is sent from this identity.
pub const SENDER: &str = "Resume Automator <onboarding@resend.dev>";

/// Body of `POST /api/send-resume`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResumeRequest {
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub resume_html: String,
    pub job_title: String,
}

impl SendResumeRequest {
    /// The given subject, or `Application for {jobTitle}` when absent or empty.
    pub fn effective_subject(&self) -> String {
        match self.subject.as_deref() {
            Some(subject) if !subject.is_empty() => subject.to_string(),
            _ => format!("Application for {}", self.job_title),
        }
    }
}

/// What gets handed to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl From<&SendResumeRequest> for OutgoingEmail {
    fn from(request: &SendResumeRequest) -> Self {
        Self {
            from: SENDER.to_string(),
            to: vec![request.to.clone()],
            subject: request.effective_subject(),
            html: request.resume_html.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered and refused the send. Carries its payload.
    #[error("Email provider rejected the send: {0}")]
    Rejected(Value),

    #[error("{0}")]
    Failed(String),
}

/// Carried in `AppState` as `Option<Arc<dyn EmailProvider>>`; `None` when no
/// credential is configured.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Sends one email, returning the provider's response payload.
    async fn send(&self, email: &OutgoingEmail) -> Result<Value, ProviderError>;
}

pub struct ResendClient {
    client: Client,
    api_key: String,
}

impl ResendClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl EmailProvider for ResendClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<Value, ProviderError> {
        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| ProviderError::Failed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Failed(e.to_string()))?;

        if !status.is_success() {
            let payload = serde_json::from_str::<Value>(&body).unwrap_or_else(|_| {
                json!({ "statusCode": status.as_u16(), "message": body })
            });
            return Err(ProviderError::Rejected(payload));
        }

        debug!("Resend accepted email to {:?}", email.to);
        serde_json::from_str(&body).map_err(|e| ProviderError::Failed(e.to_string()))
    }
}
