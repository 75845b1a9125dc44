//! Axum handler for the Email Relay Service.
//!
//! Responses keep the relay's own wire shapes (`{error: ...}` or
//! `{success: true, data}`) rather than the `AppError` envelope.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::relay::{OutgoingEmail, ProviderError, SendResumeRequest};
use crate::state::AppState;

pub const NOT_CONFIGURED_MESSAGE: &str = "Resend API key not configured";

#[derive(Debug)]
pub enum RelayError {
    NotConfigured,
    /// The body was not a valid send-resume request.
    InvalidBody { status: StatusCode, message: String },
    Provider(ProviderError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            RelayError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Value::String(NOT_CONFIGURED_MESSAGE.to_string()),
            ),
            RelayError::InvalidBody { status, message } => (status, Value::String(message)),
            RelayError::Provider(ProviderError::Rejected(payload)) => {
                (StatusCode::BAD_REQUEST, payload)
            }
            RelayError::Provider(ProviderError::Failed(message)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Value::String(message))
            }
        };

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct SendResumeResponse {
    pub success: bool,
    pub data: Value,
}

/// POST /api/send-resume
///
/// The credential is checked before the body, so an unconfigured relay always
/// answers with the not-configured error.
pub async fn handle_send_resume(
    State(state): State<AppState>,
    payload: Result<Json<SendResumeRequest>, JsonRejection>,
) -> Result<Json<SendResumeResponse>, RelayError> {
    let Some(mailer) = state.mailer.as_ref() else {
        warn!("Send-resume requested but RESEND_API_KEY is not configured");
        return Err(RelayError::NotConfigured);
    };

    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected send-resume body: {}", rejection.body_text());
        RelayError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    })?;

    let email = OutgoingEmail::from(&request);
    match mailer.send(&email).await {
        Ok(data) => {
            info!("Relayed resume for '{}'", request.job_title);
            Ok(Json(SendResumeResponse {
                success: true,
                data,
            }))
        }
        Err(e) => {
            error!("Relaying resume failed: {e}");
            Err(RelayError::Provider(e))
        }
    }
}
