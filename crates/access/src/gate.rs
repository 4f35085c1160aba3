use tracing::debug;

use crate::{
    classify::DomainMode,
    routes::{Route, RouteId, RouteRequirement, RouteTable},
};

// ── Types ────────────────────────────────────────────────────────────────────

/// Outcome of gating one navigation. A redirect is a normal decision, not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Render,
    RedirectToLogin,
    RedirectToDefaultView,
}

impl AccessDecision {
    pub fn allow(&self) -> bool {
        matches!(self, Self::Render)
    }

    /// Target route when the decision redirects.
    pub fn redirect_to(&self) -> Option<RouteId> {
        match self {
            Self::Render => None,
            Self::RedirectToLogin => Some(RouteId::Login),
            Self::RedirectToDefaultView => Some(RouteTable::DEFAULT_VIEW),
        }
    }
}

/// A gated navigation: the resolved route plus the decision for it.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub route: &'static Route,
    pub decision: AccessDecision,
}

// ── Gate ─────────────────────────────────────────────────────────────────────

/// Per-navigation decision over (deployment mode, route requirement,
/// session presence). Pure and cheap: it holds the route table and nothing
/// else, so concurrent evaluations share no mutable state.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    table: RouteTable,
}

impl AccessGate {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Gate one navigation event. Session presence is sampled by the
    /// caller at this instant; a session that expired since the last
    /// navigation shows up here as absent.
    pub fn evaluate(&self, mode: DomainMode, path: &str, session_present: bool) -> Evaluation {
        let route = self.table.resolve(path);
        let decision = decide(mode, route.requirement, session_present);
        debug!(
            path,
            route = route.title,
            ?mode,
            session_present,
            ?decision,
            "navigation gated"
        );
        Evaluation { route, decision }
    }
}

/// The decision table. Public never hosts private-only views regardless of
/// session state; private-only views on the private surface need a
/// session; public-only views exist nowhere but the public surface.
pub fn decide(
    mode: DomainMode,
    requirement: RouteRequirement,
    session_present: bool,
) -> AccessDecision {
    match (mode, requirement) {
        (DomainMode::Public, RouteRequirement::PrivateOnly) => {
            AccessDecision::RedirectToDefaultView
        },
        (DomainMode::Public, _) => AccessDecision::Render,
        (DomainMode::Private, RouteRequirement::PrivateOnly) => {
            if session_present {
                AccessDecision::Render
            } else {
                AccessDecision::RedirectToLogin
            }
        },
        (DomainMode::Private, RouteRequirement::PublicOnly) => {
            AccessDecision::RedirectToDefaultView
        },
        (DomainMode::Private, RouteRequirement::Either) => AccessDecision::Render,
    }
}
