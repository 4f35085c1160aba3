use thiserror::Error;

use crate::types::WithdrawalRequest;

/// Failures from money-movement calls. None of these are fatal: the worst
/// outcome is one failed action, with state left where it was.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Input rejected before any network call was made.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// Fresh checkout-session creation failed and no fallback link is
    /// configured.
    #[error("checkout unavailable: {0}")]
    CheckoutUnavailable(String),

    /// The payout service could not be reached. The carried request never
    /// left Draft.
    #[error("withdrawal service unavailable: {reason}")]
    WithdrawalUnavailable {
        request: WithdrawalRequest,
        reason: String,
    },
}

impl PaymentError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
