/// Config schema types (domains, endpoints, payments, storage).

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrongroomConfig {
    pub domains: DomainsConfig,
    pub endpoints: EndpointsConfig,
    pub payments: PaymentsConfig,
    pub storage: StorageConfig,
}

/// Serving-origin identifiers for the two deployment modes.
///
/// Classification is a substring match, so a bare apex value also covers
/// subdomains. Unknown origins fall through to the private surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainsConfig {
    /// Origin serving the public, deposit-only surface.
    pub public: String,

    /// Origin serving the private, full-control surface.
    pub private: String,
}

impl Default for DomainsConfig {
    fn default() -> Self {
        Self {
            public: "stripe-autobot.fr".into(),
            private: "console.autobot.fr".into(),
        }
    }
}

/// External service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Credential-verification service (username/password/license key → token).
    pub login_url: String,

    /// Capital and transaction-history data endpoint.
    pub capital_url: String,

    /// Payment-processor checkout-session creation endpoint.
    pub checkout_url: String,

    /// Withdrawal submission endpoint.
    pub payout_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            login_url: "https://api.autobot.fr/auth/login".into(),
            capital_url: "https://api.autobot.fr/capital".into(),
            checkout_url: "https://api.autobot.fr/payments/checkout-session".into(),
            payout_url: "https://api.autobot.fr/payments/withdrawals".into(),
        }
    }
}

/// Money-movement settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    /// ISO 4217 codes accepted for deposits, lowercase.
    pub supported_currencies: Vec<String>,

    /// Currency used for withdrawal submissions.
    pub default_currency: String,

    /// Pre-provisioned checkout link used when fresh session creation fails.
    /// A stale link here degrades the fallback silently; keep it current
    /// with the processor dashboard.
    pub fallback_checkout_url: String,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            supported_currencies: vec!["eur".into(), "usd".into()],
            default_currency: "eur".into(),
            fallback_checkout_url: "https://buy.stripe.com/eVa9Btf0V0zq6fJ5kC".into(),
        }
    }
}

/// Persisted client-side state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the session-token slot path.
    /// Defaults to `<config dir>/session_token` when unset.
    pub token_path: Option<std::path::PathBuf>,
}

impl PaymentsConfig {
    /// Check whether a currency code is accepted for deposits.
    pub fn supports_currency(&self, code: &str) -> bool {
        let code = code.to_ascii_lowercase();
        self.supported_currencies.iter().any(|c| *c == code)
    }
}
