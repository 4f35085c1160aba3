//! Local decode of the bearer session token.
//!
//! The token is JWT-shaped (`header.claims.signature`); only the claims
//! segment is read, as base64url JSON. No signature check happens here:
//! decoded claims gate *views* only, and every privileged data request
//! carries the raw bearer for the receiving service to re-authorize.

use {
    base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD},
    chrono::Utc,
    serde::{Deserialize, Serialize},
};

/// Role claim carried by the credential service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// Claims the credential service signs into the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub role: Role,
    /// Unix seconds. The sole expiry authority.
    pub exp: i64,
}

/// An authenticated identity and its validity window.
///
/// Never mutated in place: expiry replaces the session with absence at the
/// next read, it does not flip a flag on this value.
#[derive(Debug, Clone)]
pub struct Session {
    pub subject: String,
    pub role: Role,
    /// Claims exactly as issued, kept for display and debugging.
    pub issued_claims: serde_json::Value,
    /// Unix seconds.
    pub expires_at: i64,
}

impl Session {
    /// Decode a session from a bearer token without any network round-trip.
    ///
    /// Returns `None` for anything that is not a three-segment token with a
    /// base64url JSON claims segment containing `sub` and `exp`. Callers
    /// treat that as the anonymous state.
    pub fn from_token(token: &str) -> Option<Self> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return None;
        }
        let payload = segments[1].trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let issued_claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
        let claims: Claims = serde_json::from_value(issued_claims.clone()).ok()?;
        Some(Self {
            subject: claims.sub,
            role: claims.role,
            issued_claims,
            expires_at: claims.exp,
        })
    }

    /// A session is valid iff `now < expires_at`.
    pub fn is_valid_at(&self, now_unix: i64) -> bool {
        now_unix < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp())
    }

    /// Seconds until expiry at `now_unix`; zero once expired.
    pub fn seconds_remaining(&self, now_unix: i64) -> i64 {
        (self.expires_at - now_unix).max(0)
    }
}
