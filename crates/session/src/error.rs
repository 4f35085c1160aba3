use thiserror::Error;

/// Failures surfaced from a login attempt.
///
/// An expired or malformed *stored* token is deliberately not represented
/// here: at load time it degrades to the anonymous state instead of
/// erroring, because a missing session is an expected condition.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential service rejected the username/password/license key.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The credential service answered with a token whose claims segment
    /// cannot be decoded.
    #[error("credential service returned a malformed token")]
    MalformedToken,

    /// The credential service answered with an unexpected status.
    #[error("credential service error: HTTP {0}")]
    Service(u16),

    /// The credential service could not be reached.
    #[error("credential service unreachable")]
    Transport(#[from] reqwest::Error),

    /// The issued token could not be persisted to the slot.
    #[error("failed to persist session token: {0}")]
    Storage(String),
}
