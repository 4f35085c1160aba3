use serde::{Deserialize, Serialize};

// ── Types ────────────────────────────────────────────────────────────────────

/// Which of the two audiences a serving origin presents to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainMode {
    /// Unauthenticated, deposit-only surface.
    Public,
    /// Authenticated, full-control surface.
    Private,
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Loopback names count as the private surface (local development).
pub fn is_loopback(host: &str) -> bool {
    host == "localhost"
        || host == "127.0.0.1"
        || host.starts_with("127.")
        || host == "::1"
        || host.starts_with("::ffff:127.")
}

// ── Classifier ───────────────────────────────────────────────────────────────

/// Maps a serving origin to a deployment mode.
///
/// Pure function of the origin string: no state, no caching, re-run on
/// every navigation. Unknown origins classify as Private, which still
/// requires a session before anything renders; Public would expose the
/// gate-free surface.
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    public_host: String,
    private_host: String,
}

impl DomainClassifier {
    pub fn new(public_host: impl Into<String>, private_host: impl Into<String>) -> Self {
        Self {
            public_host: public_host.into(),
            private_host: private_host.into(),
        }
    }

    pub fn classify(&self, origin: &str) -> DomainMode {
        if origin.contains(&self.public_host) {
            return DomainMode::Public;
        }
        if origin.contains(&self.private_host) || is_loopback(origin) {
            return DomainMode::Private;
        }
        DomainMode::Private
    }
}
