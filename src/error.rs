use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;
use crate::credential::CredentialError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing X-API-Key")]
    MissingCredential,
    #[error("Invalid API key")]
    InvalidCredential,
    #[error("Rate limit exceeded")]
    QuotaExceeded { retry_after: Duration },
    #[error("{0}")]
    Validation(String),
    // body could not be read as the expected JSON; keeps axum's status (400/415/422)
    #[error("{detail}")]
    Body { status: StatusCode, detail: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential | AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Body { status, .. } => *status,
            AppError::Store(StoreError::AgentExists) => StatusCode::CONFLICT,
            AppError::Store(StoreError::PostNotFound) => StatusCode::NOT_FOUND,
            AppError::Credential(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Body {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

// Retry-After is whole seconds, rounded up so a client never retries too early
fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs();
    if wait.subsec_nanos() > 0 { secs + 1 } else { secs }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            // don't leak OS error text to clients
            AppError::Credential(e) => {
                tracing::error!(error = %e, "credential issuance failed");
                "Could not issue credential".to_string()
            }
            other => other.to_string(),
        };

        let mut response = (status, Json(serde_json::json!({ "detail": detail }))).into_response();
        if let AppError::QuotaExceeded { retry_after } = self {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(retry_after_secs(retry_after)),
            );
        }
        response
    }
}
