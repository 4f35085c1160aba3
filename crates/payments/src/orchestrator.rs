use std::sync::Arc;

use tracing::{info, warn};

use strongroom_config::PaymentsConfig;
use strongroom_session::SessionManager;

use crate::{
    checkout::CheckoutProvider,
    error::PaymentError,
    payout::PayoutProvider,
    types::{BankDestination, PaymentSession, WithdrawalRequest, WithdrawalStatus},
};

/// Orchestrates deposits and withdrawals. Independent of the access gate:
/// the public surface permits deposits without a session, and the session
/// manager is consulted only to attach identity to withdrawals.
///
/// Never retries a failed call on its own; a retry is a new user click.
pub struct PaymentOrchestrator {
    checkout: Arc<dyn CheckoutProvider>,
    payout: Arc<dyn PayoutProvider>,
    sessions: Arc<SessionManager>,
    supported_currencies: Vec<String>,
    withdrawal_currency: String,
    fallback_checkout_url: String,
}

impl PaymentOrchestrator {
    pub fn new(
        checkout: Arc<dyn CheckoutProvider>,
        payout: Arc<dyn PayoutProvider>,
        sessions: Arc<SessionManager>,
        payments: &PaymentsConfig,
    ) -> Self {
        Self {
            checkout,
            payout,
            sessions,
            supported_currencies: payments
                .supported_currencies
                .iter()
                .map(|c| c.to_ascii_lowercase())
                .collect(),
            withdrawal_currency: payments.default_currency.clone(),
            fallback_checkout_url: payments.fallback_checkout_url.clone(),
        }
    }

    /// Create a deposit checkout session.
    ///
    /// Validates before any network call. When the processor cannot issue
    /// a fresh session, degrades to the configured static checkout link
    /// so the user is never fully blocked from depositing. Each call creates
    /// a new [`PaymentSession`]; nothing is deduplicated here.
    pub async fn create_deposit(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentSession, PaymentError> {
        if amount_minor <= 0 {
            return Err(PaymentError::Validation {
                field: "amount",
                reason: "must be a positive number of minor units",
            });
        }
        let currency = currency.to_ascii_lowercase();
        if !self.supported_currencies.contains(&currency) {
            return Err(PaymentError::Validation {
                field: "currency",
                reason: "unsupported currency code",
            });
        }

        match self.checkout.create_session(amount_minor, &currency).await {
            Ok(url) => {
                let session = PaymentSession::created(amount_minor, currency, url);
                info!(id = %session.id, amount_minor, "checkout session created");
                Ok(session)
            },
            Err(e) if !self.fallback_checkout_url.is_empty() => {
                warn!(error = %e, "checkout creation failed, using static fallback link");
                Ok(PaymentSession::created(
                    amount_minor,
                    currency,
                    self.fallback_checkout_url.clone(),
                ))
            },
            Err(e) => Err(PaymentError::CheckoutUnavailable(e.to_string())),
        }
    }

    /// Submit a withdrawal to the payout service.
    ///
    /// Validates all inputs before any network call. The request is built
    /// as a Draft carrying the current subject when a session exists, and
    /// only a service response moves it past Draft. A failed send returns
    /// [`PaymentError::WithdrawalUnavailable`] with the untouched draft.
    pub async fn submit_withdrawal(
        &self,
        amount_minor: i64,
        account_holder: &str,
        iban: &str,
    ) -> Result<WithdrawalRequest, PaymentError> {
        if amount_minor <= 0 {
            return Err(PaymentError::Validation {
                field: "amount",
                reason: "must be a positive number of minor units",
            });
        }
        let account_holder = account_holder.trim();
        if account_holder.is_empty() {
            return Err(PaymentError::Validation {
                field: "accountHolderName",
                reason: "must not be empty",
            });
        }
        let iban = iban.trim();
        if iban.is_empty() {
            return Err(PaymentError::Validation {
                field: "destination",
                reason: "must not be empty",
            });
        }

        let subject = self.sessions.subject().await;
        let mut request = WithdrawalRequest::draft(
            amount_minor,
            self.withdrawal_currency.clone(),
            account_holder,
            BankDestination::iban(iban),
            subject,
        );

        let bearer = self.sessions.bearer_token().await;
        match self.payout.submit(&request, bearer.as_deref()).await {
            Ok(receipt) => {
                request.status = match receipt.status.as_str() {
                    "accepted" => WithdrawalStatus::Accepted,
                    "rejected" => WithdrawalStatus::Rejected,
                    _ => WithdrawalStatus::Submitted,
                };
                info!(
                    status = ?request.status,
                    message = receipt.message.as_deref().unwrap_or_default(),
                    "withdrawal submitted"
                );
                Ok(request)
            },
            Err(e) => {
                warn!(error = %e, "payout service unreachable, withdrawal stays draft");
                Err(PaymentError::WithdrawalUnavailable {
                    request,
                    reason: e.to_string(),
                })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use {
        anyhow::anyhow,
        async_trait::async_trait,
        base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD},
        chrono::Utc,
    };

    use strongroom_session::TokenSlot;

    use super::*;
    use crate::{payout::PayoutReceipt, types::PaymentStatus};

    // ── Fakes ────────────────────────────────────────────────────────────

    struct FakeCheckout {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeCheckout {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl CheckoutProvider for FakeCheckout {
        async fn create_session(&self, amount_minor: i64, currency: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(anyhow!("processor down"));
            }
            Ok(format!("https://checkout.example/{currency}/{amount_minor}"))
        }
    }

    struct FakePayout {
        calls: AtomicUsize,
        response: Option<(&'static str, Option<&'static str>)>,
        saw_bearer: std::sync::Mutex<Option<String>>,
    }

    impl FakePayout {
        fn responding(status: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Some((status, None)),
                saw_bearer: std::sync::Mutex::new(None),
            }
        }

        fn unreachable() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: None,
                saw_bearer: std::sync::Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl PayoutProvider for FakePayout {
        async fn submit(
            &self,
            _request: &WithdrawalRequest,
            bearer: Option<&str>,
        ) -> anyhow::Result<PayoutReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut saw) = self.saw_bearer.lock() {
                *saw = bearer.map(str::to_string);
            }
            match self.response {
                Some((status, message)) => Ok(PayoutReceipt {
                    status: status.into(),
                    message: message.map(str::to_string),
                }),
                None => Err(anyhow!("connection refused")),
            }
        }
    }

    // ── Harness ──────────────────────────────────────────────────────────

    fn make_token(sub: &str, exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = serde_json::json!({"sub": sub, "exp": exp});
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.sig")
    }

    fn anonymous_sessions(dir: &tempfile::TempDir) -> Arc<SessionManager> {
        Arc::new(SessionManager::new(
            "http://unused.invalid/login",
            TokenSlot::with_path(dir.path().join("session_token")),
        ))
    }

    async fn authenticated_sessions(dir: &tempfile::TempDir, sub: &str) -> Arc<SessionManager> {
        let slot = TokenSlot::with_path(dir.path().join("session_token"));
        slot.save(&make_token(sub, Utc::now().timestamp() + 3600))
            .unwrap();
        let manager = anonymous_sessions(dir);
        manager.load().await.unwrap();
        manager
    }

    fn orchestrator(
        checkout: Arc<FakeCheckout>,
        payout: Arc<FakePayout>,
        sessions: Arc<SessionManager>,
        fallback: &str,
    ) -> PaymentOrchestrator {
        let payments = PaymentsConfig {
            supported_currencies: vec!["eur".into(), "usd".into()],
            default_currency: "eur".into(),
            fallback_checkout_url: fallback.into(),
        };
        PaymentOrchestrator::new(checkout, payout, sessions, &payments)
    }

    // ── Deposits ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn nonpositive_amount_never_reaches_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let checkout = Arc::new(FakeCheckout::ok());
        let orch = orchestrator(
            Arc::clone(&checkout),
            Arc::new(FakePayout::unreachable()),
            anonymous_sessions(&dir),
            "https://fallback.example",
        );

        for amount in [0, -1, -5000] {
            let err = orch.create_deposit(amount, "eur").await.unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(checkout.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsupported_currency_never_reaches_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let checkout = Arc::new(FakeCheckout::ok());
        let orch = orchestrator(
            Arc::clone(&checkout),
            Arc::new(FakePayout::unreachable()),
            anonymous_sessions(&dir),
            "https://fallback.example",
        );

        let err = orch.create_deposit(5000, "xyz").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(checkout.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn deposit_creates_a_fresh_session_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let checkout = Arc::new(FakeCheckout::ok());
        let orch = orchestrator(
            Arc::clone(&checkout),
            Arc::new(FakePayout::unreachable()),
            anonymous_sessions(&dir),
            "https://fallback.example",
        );

        let first = orch.create_deposit(5000, "EUR").await.unwrap();
        let second = orch.create_deposit(5000, "EUR").await.unwrap();
        assert_eq!(first.status, PaymentStatus::Created);
        assert_eq!(first.currency, "eur");
        assert!(first.checkout_url.contains("/eur/5000"));
        // Same amount, still two sessions and two processor calls.
        assert_ne!(first.id, second.id);
        assert_eq!(checkout.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn processor_failure_falls_back_to_static_link() {
        let dir = tempfile::tempdir().unwrap();
        let checkout = Arc::new(FakeCheckout::failing());
        let orch = orchestrator(
            Arc::clone(&checkout),
            Arc::new(FakePayout::unreachable()),
            anonymous_sessions(&dir),
            "https://fallback.example/checkout",
        );

        let session = orch.create_deposit(5000, "eur").await.unwrap();
        assert_eq!(session.status, PaymentStatus::Created);
        assert_eq!(session.checkout_url, "https://fallback.example/checkout");
        // One attempt only; retries are user-initiated.
        assert_eq!(checkout.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn processor_failure_without_fallback_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(
            Arc::new(FakeCheckout::failing()),
            Arc::new(FakePayout::unreachable()),
            anonymous_sessions(&dir),
            "",
        );

        let err = orch.create_deposit(5000, "eur").await.unwrap_err();
        assert!(matches!(err, PaymentError::CheckoutUnavailable(_)));
    }

    // ── Withdrawals ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn empty_holder_or_destination_never_reaches_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let payout = Arc::new(FakePayout::responding("accepted"));
        let orch = orchestrator(
            Arc::new(FakeCheckout::ok()),
            Arc::clone(&payout),
            anonymous_sessions(&dir),
            "https://fallback.example",
        );

        assert!(
            orch.submit_withdrawal(100, "", "FR7630006000011234567890189")
                .await
                .unwrap_err()
                .is_validation()
        );
        assert!(
            orch.submit_withdrawal(100, "   ", "FR7630006000011234567890189")
                .await
                .unwrap_err()
                .is_validation()
        );
        assert!(
            orch.submit_withdrawal(100, "John Doe", "")
                .await
                .unwrap_err()
                .is_validation()
        );
        assert!(
            orch.submit_withdrawal(0, "John Doe", "FR7630006000011234567890189")
                .await
                .unwrap_err()
                .is_validation()
        );
        assert_eq!(payout.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn accepted_and_rejected_statuses_map_through() {
        let dir = tempfile::tempdir().unwrap();
        for (wire, expected) in [
            ("accepted", WithdrawalStatus::Accepted),
            ("rejected", WithdrawalStatus::Rejected),
            ("pending", WithdrawalStatus::Submitted),
        ] {
            let orch = orchestrator(
                Arc::new(FakeCheckout::ok()),
                Arc::new(FakePayout::responding(wire)),
                anonymous_sessions(&dir),
                "https://fallback.example",
            );
            let request = orch
                .submit_withdrawal(100, "John Doe", "FR7630006000011234567890189")
                .await
                .unwrap();
            assert_eq!(request.status, expected);
        }
    }

    #[tokio::test]
    async fn unreachable_payout_service_leaves_request_draft() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(
            Arc::new(FakeCheckout::ok()),
            Arc::new(FakePayout::unreachable()),
            anonymous_sessions(&dir),
            "https://fallback.example",
        );

        let err = orch
            .submit_withdrawal(100, "John Doe", "FR7630006000011234567890189")
            .await
            .unwrap_err();
        match err {
            PaymentError::WithdrawalUnavailable { request, .. } => {
                assert_eq!(request.status, WithdrawalStatus::Draft);
            },
            other => panic!("expected WithdrawalUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn withdrawal_carries_subject_and_bearer_when_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let payout = Arc::new(FakePayout::responding("accepted"));
        let orch = orchestrator(
            Arc::new(FakeCheckout::ok()),
            Arc::clone(&payout),
            authenticated_sessions(&dir, "operator@autobot.fr").await,
            "https://fallback.example",
        );

        let request = orch
            .submit_withdrawal(100, "John Doe", "FR7630006000011234567890189")
            .await
            .unwrap();
        assert_eq!(request.subject.as_deref(), Some("operator@autobot.fr"));
        assert!(payout.saw_bearer.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn anonymous_withdrawal_has_no_subject() {
        let dir = tempfile::tempdir().unwrap();
        let payout = Arc::new(FakePayout::responding("accepted"));
        let orch = orchestrator(
            Arc::new(FakeCheckout::ok()),
            Arc::clone(&payout),
            anonymous_sessions(&dir),
            "https://fallback.example",
        );

        let request = orch
            .submit_withdrawal(100, "John Doe", "FR7630006000011234567890189")
            .await
            .unwrap();
        assert!(request.subject.is_none());
        assert!(payout.saw_bearer.lock().unwrap().is_none());
    }
}
