use serde::{Deserialize, Serialize};

// ── Deposits ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Created,
    Redirected,
    Failed,
}

/// One deposit checkout attempt. Lives until the browser navigates to the
/// processor or creation fails. Every attempt gets a fresh id; dedup, if
/// any, belongs to the processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub checkout_url: String,
    pub status: PaymentStatus,
    /// Unix seconds.
    pub created_at: i64,
}

impl PaymentSession {
    pub fn created(amount_minor: i64, currency: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            amount_minor,
            currency: currency.into(),
            checkout_url: url.into(),
            status: PaymentStatus::Created,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Record that the browser was sent to the processor.
    pub fn mark_redirected(&mut self) {
        self.status = PaymentStatus::Redirected;
    }
}

// ── Withdrawals ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Draft,
    Submitted,
    Accepted,
    Rejected,
}

/// Bank destination for a payout: a kind tag plus its details (IBAN or
/// equivalent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDestination {
    #[serde(rename = "type")]
    pub kind: String,
    pub details: String,
}

impl BankDestination {
    pub fn iban(details: impl Into<String>) -> Self {
        Self {
            kind: "iban".into(),
            details: details.into(),
        }
    }
}

/// A payout instruction. Starts as Draft client-side; transitions to
/// Submitted/Accepted/Rejected only on a response from the payout service.
/// A failed send leaves it Draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub amount_minor: i64,
    pub currency: String,
    pub account_holder: String,
    pub destination: BankDestination,
    /// Subject of the session active at submission time, when one exists.
    pub subject: Option<String>,
    pub status: WithdrawalStatus,
}

impl WithdrawalRequest {
    pub fn draft(
        amount_minor: i64,
        currency: impl Into<String>,
        account_holder: impl Into<String>,
        destination: BankDestination,
        subject: Option<String>,
    ) -> Self {
        Self {
            amount_minor,
            currency: currency.into(),
            account_holder: account_holder.into(),
            destination,
            subject,
            status: WithdrawalStatus::Draft,
        }
    }
}
