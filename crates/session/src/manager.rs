use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
    tokio::sync::RwLock,
    tracing::{debug, info, warn},
};

use crate::{error::AuthError, store::TokenSlot, token::Session};

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    license_key: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

// ── Manager ──────────────────────────────────────────────────────────────────

/// The live session, paired with the raw bearer it was decoded from.
#[derive(Clone)]
struct ActiveSession {
    session: Session,
    token: String,
}

/// Owner of the bearer-session lifecycle: load from the persisted slot,
/// issue via login, tear down via logout.
///
/// One instance is shared by handle (`Arc`) with every consumer; there is
/// no ambient global. The Absent→Present transition is atomic: either a
/// fully decoded [`Session`] is installed under the lock or nothing
/// changes, so concurrent gate evaluations always see a coherent state.
pub struct SessionManager {
    http: reqwest::Client,
    login_url: String,
    slot: TokenSlot,
    current: RwLock<Option<ActiveSession>>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("login_url", &self.login_url)
            .field("slot", &self.slot)
            .field("current", &"[REDACTED]")
            .finish()
    }
}

impl SessionManager {
    pub fn new(login_url: impl Into<String>, slot: TokenSlot) -> Self {
        Self {
            http: reqwest::Client::new(),
            login_url: login_url.into(),
            slot,
            current: RwLock::new(None),
        }
    }

    /// Restore a session from the persisted slot, without any network call.
    ///
    /// A malformed or expired stored token is cleared and reported as
    /// absence. An anonymous visit is a normal state, never an error.
    pub async fn load(&self) -> Option<Session> {
        let token = self.slot.load()?;
        match Session::from_token(&token) {
            Some(session) if session.is_valid() => {
                let mut guard = self.current.write().await;
                *guard = Some(ActiveSession {
                    session: session.clone(),
                    token,
                });
                debug!(subject = %session.subject, "session restored from storage");
                Some(session)
            },
            Some(_) => {
                debug!("stored session token expired, clearing slot");
                self.clear_slot();
                None
            },
            None => {
                debug!("stored session token malformed, clearing slot");
                self.clear_slot();
                None
            },
        }
    }

    /// Exchange credentials for a session via the external credential
    /// service. On success the token is persisted and the session installed
    /// atomically; on failure any prior session is left untouched.
    pub async fn login(
        &self,
        username: &str,
        password: &Secret<String>,
        license_key: &Secret<String>,
    ) -> Result<Session, AuthError> {
        let request = LoginRequest {
            username,
            password: password.expose_secret(),
            license_key: license_key.expose_secret(),
        };

        let response = self
            .http
            .post(&self.login_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::Service(status.as_u16()));
        }

        let body: LoginResponse = response.json().await?;
        let session = Session::from_token(&body.token).ok_or(AuthError::MalformedToken)?;

        self.slot
            .save(&body.token)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        *self.current.write().await = Some(ActiveSession {
            session: session.clone(),
            token: body.token,
        });

        info!(subject = %session.subject, role = ?session.role, "session established");
        Ok(session)
    }

    /// Tear the session down: clear the slot, drop the outbound identity.
    /// Idempotent: logging out of an absent session is a no-op.
    pub async fn logout(&self) {
        self.clear_slot();
        let mut guard = self.current.write().await;
        if guard.take().is_some() {
            debug!("session cleared");
        }
    }

    /// The session visible right now, re-checking expiry on every read.
    ///
    /// Expiry is detected lazily here, at the next gate evaluation, not
    /// by a background timer, so a user reading a view is never yanked
    /// mid-visit. An expired session is torn down and reported as absent.
    pub async fn current(&self) -> Option<Session> {
        {
            let guard = self.current.read().await;
            match guard.as_ref() {
                Some(active) if active.session.is_valid() => {
                    return Some(active.session.clone());
                },
                Some(_) => {},
                None => return None,
            }
        }

        // Expired at read time: tear down under the write lock, re-checking
        // in case a fresh login won the race in between.
        let mut guard = self.current.write().await;
        if let Some(active) = guard.as_ref()
            && !active.session.is_valid()
        {
            debug!(subject = %active.session.subject, "session expired, tearing down");
            self.clear_slot();
            *guard = None;
        }
        guard
            .as_ref()
            .filter(|a| a.session.is_valid())
            .map(|a| a.session.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current().await.is_some()
    }

    /// Raw bearer for outbound identity. Collaborators attach identity
    /// only through this accessor; the header value is owned here.
    pub async fn bearer_token(&self) -> Option<String> {
        let guard = self.current.read().await;
        guard
            .as_ref()
            .filter(|a| a.session.is_valid())
            .map(|a| a.token.clone())
    }

    /// Subject of the current session, if one exists.
    pub async fn subject(&self) -> Option<String> {
        self.current().await.map(|s| s.subject)
    }

    fn clear_slot(&self) {
        if let Err(e) = self.slot.clear() {
            warn!(error = %e, "failed to clear session token slot");
        }
    }
}
