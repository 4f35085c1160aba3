use std::sync::Arc;

use {
    strongroom_access::{AccessGate, DomainClassifier, DomainMode, RouteTable},
    strongroom_capital::CapitalClient,
    strongroom_config::StrongroomConfig,
    strongroom_payments::{HttpCheckoutProvider, HttpPayoutProvider, PaymentOrchestrator},
    strongroom_session::{SessionManager, TokenSlot},
};

/// Wired application components, shared by every subcommand.
///
/// The session manager is the single handle to auth state. Components
/// receive it by `Arc`, never through a global.
pub struct App {
    pub mode: DomainMode,
    pub gate: AccessGate,
    pub sessions: Arc<SessionManager>,
    pub payments: PaymentOrchestrator,
    pub capital: CapitalClient,
}

impl App {
    pub async fn bootstrap(origin: &str) -> Self {
        let config = strongroom_config::discover_and_load();
        Self::from_config(config, origin).await
    }

    pub async fn from_config(config: StrongroomConfig, origin: &str) -> Self {
        let classifier =
            DomainClassifier::new(config.domains.public.as_str(), config.domains.private.as_str());
        let mode = classifier.classify(origin);

        let slot = match &config.storage.token_path {
            Some(path) => TokenSlot::with_path(path.clone()),
            None => TokenSlot::new(),
        };
        let sessions = Arc::new(SessionManager::new(config.endpoints.login_url.clone(), slot));
        // Restore any persisted session before the first gate evaluation.
        sessions.load().await;

        let payments = PaymentOrchestrator::new(
            Arc::new(HttpCheckoutProvider::new(
                config.endpoints.checkout_url.clone(),
            )),
            Arc::new(HttpPayoutProvider::new(config.endpoints.payout_url.clone())),
            Arc::clone(&sessions),
            &config.payments,
        );
        let capital = CapitalClient::new(config.endpoints.capital_url.clone());

        Self {
            mode,
            gate: AccessGate::new(RouteTable),
            sessions,
            payments,
            capital,
        }
    }
}
