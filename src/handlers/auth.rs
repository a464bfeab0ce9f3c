use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use crate::error::AppError;
use crate::metrics::{TRACKED_CREDENTIALS, WRITES_ACCEPTED, WRITES_RATE_LIMITED, WRITE_REQUESTS};
use crate::rate_limit::Decision;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Credential presented on a write request via `X-API-Key`.
///
/// Only presence is checked here; whether it belongs to an agent is decided after
/// the rate limiter has seen it.
pub struct ApiKey(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::MissingCredential)?;
        Ok(ApiKey(key.to_string()))
    }
}

// Consult the limiter for this credential; QuotaExceeded stops the write.
pub(crate) fn admit(state: &AppState, key: &ApiKey) -> Result<(), AppError> {
    WRITE_REQUESTS.inc();
    let decision = state.rate_limiter.check_and_record(&key.0, state.clock.now());
    TRACKED_CREDENTIALS.set(state.rate_limiter.tracked_credentials() as f64);

    match decision {
        Decision::Accepted => {
            WRITES_ACCEPTED.inc();
            Ok(())
        }
        Decision::Rejected { retry_after } => {
            WRITES_RATE_LIMITED.inc();
            tracing::warn!(
                limit = state.rate_limiter.limit(),
                window_secs = state.rate_limiter.window().as_secs(),
                retry_after_ms = retry_after.as_millis() as u64,
                "write rejected by rate limiter"
            );
            Err(AppError::QuotaExceeded { retry_after })
        }
    }
}
