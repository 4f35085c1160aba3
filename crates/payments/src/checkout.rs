//! Checkout-session creation against the external payment processor.

use {
    anyhow::{Context, anyhow},
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
};

/// Creates hosted checkout sessions. One real HTTP implementation; tests
/// substitute fakes.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a fresh checkout session and return its redirect URL.
    async fn create_session(&self, amount_minor: i64, currency: &str) -> anyhow::Result<String>;
}

// ── HTTP implementation ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct HttpCheckoutProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpCheckoutProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

// ── API Types ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CheckoutRequest<'a> {
    /// Minor units (cents).
    amount: i64,
    currency: &'a str,
}

#[derive(Deserialize)]
struct CheckoutResponse {
    url: String,
}

#[async_trait]
impl CheckoutProvider for HttpCheckoutProvider {
    async fn create_session(&self, amount_minor: i64, currency: &str) -> anyhow::Result<String> {
        let request = CheckoutRequest {
            amount: amount_minor,
            currency,
        };

        let response: CheckoutResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .context("failed to reach checkout endpoint")?
            .error_for_status()
            .context("checkout endpoint rejected the request")?
            .json()
            .await
            .context("failed to parse checkout response")?;

        if response.url.is_empty() {
            return Err(anyhow!("checkout endpoint returned an empty URL"));
        }
        Ok(response.url)
    }
}
