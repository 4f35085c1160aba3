//! Client for the capital/transaction-history data endpoint.
//!
//! Read-only: the dashboard renders whatever this returns. Identity is
//! optional: the public surface fetches anonymously, the private console
//! attaches the bearer it gets from the session manager.

use {
    serde::{Deserialize, Serialize},
    thiserror::Error,
    tracing::debug,
};

// ── API Types ────────────────────────────────────────────────────────────────

/// Current capital state as reported by the data endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalSnapshot {
    pub initial_capital: f64,
    pub current_capital: f64,
    pub profit: f64,
    pub roi: f64,
    pub trading_allocation: f64,
    pub ecommerce_allocation: f64,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

/// One row of money-movement history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub source: String,
    pub status: String,
}

#[derive(Debug, Error)]
pub enum CapitalError {
    #[error("capital endpoint unreachable or rejected the request")]
    Transport(#[from] reqwest::Error),
}

// ── Client ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CapitalClient {
    client: reqwest::Client,
    url: String,
}

impl CapitalClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Fetch the current snapshot. `bearer` is the outbound identity of
    /// the current session, when one exists.
    pub async fn fetch(&self, bearer: Option<&str>) -> Result<CapitalSnapshot, CapitalError> {
        let mut request = self.client.get(&self.url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let snapshot: CapitalSnapshot = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(
            current_capital = snapshot.current_capital,
            transactions = snapshot.transactions.len(),
            "capital snapshot fetched"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "initial_capital": 10000.0,
        "current_capital": 12500.5,
        "profit": 2500.5,
        "roi": 25.0,
        "trading_allocation": 70.0,
        "ecommerce_allocation": 30.0,
        "transactions": [
            {"date": "2026-07-01", "type": "deposit", "amount": 500.0,
             "source": "stripe", "status": "completed"}
        ]
    }"#;

    #[test]
    fn snapshot_parses_contract_body() {
        let snapshot: CapitalSnapshot = serde_json::from_str(BODY).unwrap();
        assert_eq!(snapshot.current_capital, 12500.5);
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.transactions[0].kind, "deposit");
    }

    #[test]
    fn snapshot_without_transactions_parses() {
        let snapshot: CapitalSnapshot = serde_json::from_str(
            r#"{"initial_capital": 1.0, "current_capital": 1.0, "profit": 0.0,
                "roi": 0.0, "trading_allocation": 50.0, "ecommerce_allocation": 50.0}"#,
        )
        .unwrap();
        assert!(snapshot.transactions.is_empty());
    }

    #[tokio::test]
    async fn fetch_attaches_bearer_when_present() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/capital")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let client = CapitalClient::new(format!("{}/capital", server.url()));
        let snapshot = client.fetch(Some("tok-1")).await.unwrap();
        assert_eq!(snapshot.profit, 2500.5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn anonymous_fetch_sends_no_identity() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/capital")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let client = CapitalClient::new(format!("{}/capital", server.url()));
        client.fetch(None).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_surfaces_as_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/capital")
            .with_status(500)
            .create_async()
            .await;

        let client = CapitalClient::new(format!("{}/capital", server.url()));
        assert!(client.fetch(None).await.is_err());
    }
}
