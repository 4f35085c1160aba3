use serde::{Deserialize, Serialize};

// ── Types ────────────────────────────────────────────────────────────────────

/// Which deployment mode a view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteRequirement {
    /// Exclusive to the public deposit surface.
    PublicOnly,
    /// Exclusive to the private console; needs a session to render.
    PrivateOnly,
    /// Renders on both surfaces.
    Either,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteId {
    Capital,
    Transactions,
    Deposit,
    Withdraw,
    Backtest,
    Strategies,
    Invest,
    Login,
}

/// One view in the declarative route table.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub id: RouteId,
    pub path: &'static str,
    pub title: &'static str,
    pub requirement: RouteRequirement,
}

// ── Table ────────────────────────────────────────────────────────────────────

/// Route id → requirement + display title, consulted once per navigation.
/// Replaces path-string comparisons scattered through the view layer.
const ROUTES: &[Route] = &[
    Route {
        id: RouteId::Capital,
        path: "/",
        title: "Capital",
        requirement: RouteRequirement::Either,
    },
    Route {
        id: RouteId::Transactions,
        path: "/transactions",
        title: "Transactions",
        requirement: RouteRequirement::PrivateOnly,
    },
    Route {
        id: RouteId::Deposit,
        path: "/deposit",
        title: "Deposit",
        requirement: RouteRequirement::Either,
    },
    Route {
        id: RouteId::Withdraw,
        path: "/withdraw",
        title: "Withdraw",
        requirement: RouteRequirement::PrivateOnly,
    },
    Route {
        id: RouteId::Backtest,
        path: "/backtest",
        title: "Backtest",
        requirement: RouteRequirement::PrivateOnly,
    },
    Route {
        id: RouteId::Strategies,
        path: "/strategies",
        title: "Strategies",
        requirement: RouteRequirement::PrivateOnly,
    },
    Route {
        id: RouteId::Invest,
        path: "/invest",
        title: "Invest",
        requirement: RouteRequirement::PublicOnly,
    },
    Route {
        id: RouteId::Login,
        path: "/login",
        title: "Login",
        requirement: RouteRequirement::Either,
    },
];

#[derive(Debug, Clone, Default)]
pub struct RouteTable;

impl RouteTable {
    /// The view unknown and redirected navigations land on.
    pub const DEFAULT_VIEW: RouteId = RouteId::Capital;

    pub fn routes(&self) -> &'static [Route] {
        ROUTES
    }

    pub fn get(&self, id: RouteId) -> &'static Route {
        // ROUTES carries every RouteId variant; the lookup is total.
        ROUTES
            .iter()
            .find(|r| r.id == id)
            .unwrap_or(&ROUTES[0])
    }

    /// Resolve a navigation path. Unknown paths land on the default view
    /// so the gate's decision table stays total.
    pub fn resolve(&self, path: &str) -> &'static Route {
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        ROUTES
            .iter()
            .find(|r| r.path == path)
            .unwrap_or_else(|| self.get(Self::DEFAULT_VIEW))
    }
}
