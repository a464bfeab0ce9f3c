use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

// 24 random bytes -> 32 url-safe characters (192 bits)
pub const CREDENTIAL_BYTES: usize = 24;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("secure random source unavailable: {0}")]
    EntropySourceUnavailable(String),
}

/// Opaque bearer token identifying an agent on write requests.
///
/// Also the partition key of the rate limiter. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

// Draws straight from the OS CSPRNG; there is no fallback generator.
pub fn issue_credential() -> Result<Credential, CredentialError> {
    let mut bytes = [0u8; CREDENTIAL_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CredentialError::EntropySourceUnavailable(e.to_string()))?;
    Ok(Credential(URL_SAFE_NO_PAD.encode(bytes)))
}
