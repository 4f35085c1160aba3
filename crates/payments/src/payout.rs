//! Withdrawal submission to the external payout service.

use {
    anyhow::Context,
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
};

use crate::types::WithdrawalRequest;

// ── API Types ────────────────────────────────────────────────────────────────

/// Outcome reported by the payout service.
#[derive(Debug, Clone, Deserialize)]
pub struct PayoutReceipt {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayoutSubmission<'a> {
    /// Minor units (cents).
    amount: i64,
    currency: &'a str,
    destination: DestinationBody<'a>,
    account_holder_name: &'a str,
}

#[derive(Serialize)]
struct DestinationBody<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    details: &'a str,
}

// ── Provider ─────────────────────────────────────────────────────────────────

/// Submits payout instructions. One real HTTP implementation; tests
/// substitute fakes.
#[async_trait]
pub trait PayoutProvider: Send + Sync {
    /// Submit a drafted withdrawal. `bearer` is the outbound identity of
    /// the current session, when one exists.
    async fn submit(
        &self,
        request: &WithdrawalRequest,
        bearer: Option<&str>,
    ) -> anyhow::Result<PayoutReceipt>;
}

#[derive(Debug, Clone)]
pub struct HttpPayoutProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpPayoutProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl PayoutProvider for HttpPayoutProvider {
    async fn submit(
        &self,
        request: &WithdrawalRequest,
        bearer: Option<&str>,
    ) -> anyhow::Result<PayoutReceipt> {
        let body = PayoutSubmission {
            amount: request.amount_minor,
            currency: &request.currency,
            destination: DestinationBody {
                kind: &request.destination.kind,
                details: &request.destination.details,
            },
            account_holder_name: &request.account_holder,
        };

        let mut http_request = self.client.post(&self.url).json(&body);
        if let Some(token) = bearer {
            http_request = http_request.bearer_auth(token);
        }

        http_request
            .send()
            .await
            .context("failed to reach payout endpoint")?
            .error_for_status()
            .context("payout endpoint rejected the request")?
            .json()
            .await
            .context("failed to parse payout response")
    }
}
