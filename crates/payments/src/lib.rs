//! Money movement: deposit checkout sessions and withdrawal submissions.
//!
//! Independent of the access gate, since the public surface permits
//! deposits without a session. Inputs are validated before any network
//! call, and a failed checkout creation degrades to a pre-provisioned
//! static link rather than blocking the user. Nothing here retries automatically:
//! every attempt the processor sees maps to one user action.

pub mod checkout;
pub mod error;
pub mod orchestrator;
pub mod payout;
pub mod types;

pub use {
    checkout::{CheckoutProvider, HttpCheckoutProvider},
    error::PaymentError,
    orchestrator::PaymentOrchestrator,
    payout::{HttpPayoutProvider, PayoutProvider, PayoutReceipt},
    types::{
        BankDestination, PaymentSession, PaymentStatus, WithdrawalRequest, WithdrawalStatus,
    },
};
