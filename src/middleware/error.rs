use std::fmt;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::utils::stripe::webhook::hooks::WebhookError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    SignatureMissing,
    SignatureInvalid,
    Payload { source: String },
    DataApi { source: String },
    Notify { source: String },
}

/// Any error produced while handling a webhook delivery, before composing a response.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignatureMissing => write!(f, "Missing signature or secret"),
            Self::SignatureInvalid => write!(f, "Invalid signature"),
            Self::Payload { source } => write!(f, "Invalid payload - {source}"),
            Self::DataApi { source } => write!(f, "{source}"),
            Self::Notify { source } => write!(f, "Notification failed - {source}"),
        }
    }
}

// REST error response. Signature problems are a permanent request defect (400,
// Stripe must not redeliver); anything downstream is transient (500, Stripe
// retries). A signed-but-malformed payload stays 500: Stripe's retry behavior
// depends on that classification today.
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self, "webhook request failed");
        match self {
            AppError::SignatureMissing | AppError::SignatureInvalid => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
        }
    }
}

// External errors
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload {
            source: value.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        Self::DataApi {
            source: value.to_string(),
        }
    }
}

impl From<WebhookError> for AppError {
    fn from(value: WebhookError) -> Self {
        match value {
            WebhookError::ParseError(e) => Self::Payload {
                source: e.to_string(),
            },
            WebhookError::BadKey
            | WebhookError::BadSignature
            | WebhookError::BadTimestamp(_)
            | WebhookError::HeaderMissing => Self::SignatureInvalid,
        }
    }
}
