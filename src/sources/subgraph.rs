use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    models::{RiskScoreError, Result, TokenPosition},
    sources::{PositionSource, SourceConfig},
};

const ACCOUNT_TOKENS_QUERY: &str = r#"
query ($user: String!) {
    account(id: $user) {
        tokens {
            symbol
            supplyBalanceUnderlying
            borrowBalanceUnderlying
        }
    }
}
"#;

/// Compound-style lending subgraph queried over GraphQL
pub struct SubgraphClient {
    http_client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<AccountData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct AccountData {
    account: Option<Account>,
}

#[derive(Deserialize)]
struct Account {
    tokens: Option<Vec<AccountToken>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountToken {
    symbol: Option<String>,
    supply_balance_underlying: Option<serde_json::Value>,
    borrow_balance_underlying: Option<serde_json::Value>,
}

impl AccountToken {
    fn into_position(self) -> TokenPosition {
        TokenPosition {
            symbol: self.symbol.unwrap_or_default(),
            supplied: balance_from_json(self.supply_balance_underlying.as_ref()),
            borrowed: balance_from_json(self.borrow_balance_underlying.as_ref()),
        }
    }
}

impl SubgraphClient {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| RiskScoreError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint,
        })
    }
}

#[async_trait]
impl PositionSource for SubgraphClient {
    fn name(&self) -> &str {
        "subgraph"
    }

    async fn query_positions(&self, wallet_id: &str) -> Result<Option<Vec<TokenPosition>>> {
        let request = GraphQlRequest {
            query: ACCOUNT_TOKENS_QUERY,
            variables: json!({ "user": wallet_id }),
        };

        let response = self.http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RiskScoreError::DataSource {
                wallet: wallet_id.to_string(),
                message: format!("HTTP request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RiskScoreError::DataSource {
                wallet: wallet_id.to_string(),
                message: format!("Unexpected status {}", status),
            });
        }

        let body = response.bytes().await.map_err(|e| RiskScoreError::DataSource {
            wallet: wallet_id.to_string(),
            message: format!("Failed to read response body: {}", e),
        })?;

        parse_positions(wallet_id, &body)
    }
}

/// Decode a subgraph response body.
///
/// Only a body that is not JSON at all is an error. Every missing level of the
/// `data.account.tokens` path yields `None`.
pub fn parse_positions(wallet_id: &str, body: &[u8]) -> Result<Option<Vec<TokenPosition>>> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        RiskScoreError::MalformedResponse {
            wallet: wallet_id.to_string(),
            message: e.to_string(),
        }
    })?;

    let response: GraphQlResponse = match serde_json::from_value(value) {
        Ok(response) => response,
        Err(e) => {
            debug!("Unexpected response shape for {}: {}", wallet_id, e);
            return Ok(None);
        }
    };

    for error in &response.errors {
        warn!("Subgraph reported an error for {}: {}", wallet_id, error.message);
    }

    let tokens = response
        .data
        .and_then(|data| data.account)
        .and_then(|account| account.tokens);

    Ok(tokens.map(|tokens| tokens.into_iter().map(AccountToken::into_position).collect()))
}

/// Subgraph balances arrive as decimal strings or plain numbers.
fn balance_from_json(value: Option<&serde_json::Value>) -> f64 {
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: &str = "0x742d35cc6634c0532925a3b844bc9e7595f6e842";

    #[test]
    fn test_parses_token_positions() {
        let body = br#"{
            "data": {
                "account": {
                    "tokens": [
                        {"symbol": "cDAI", "supplyBalanceUnderlying": "1500.25", "borrowBalanceUnderlying": "0"},
                        {"symbol": "cETH", "supplyBalanceUnderlying": 2.5, "borrowBalanceUnderlying": "1.25"}
                    ]
                }
            }
        }"#;

        let positions = parse_positions(WALLET, body).unwrap().unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0], TokenPosition::new("cDAI", 1500.25, 0.0));
        assert_eq!(positions[1], TokenPosition::new("cETH", 2.5, 1.25));
    }

    #[test]
    fn test_missing_balance_fields_default_to_zero() {
        let body = br#"{"data": {"account": {"tokens": [
            {"symbol": "cUSDC"},
            {"supplyBalanceUnderlying": "not-a-number", "borrowBalanceUnderlying": null}
        ]}}}"#;

        let positions = parse_positions(WALLET, body).unwrap().unwrap();
        assert_eq!(positions[0], TokenPosition::new("cUSDC", 0.0, 0.0));
        assert_eq!(positions[1], TokenPosition::new("", 0.0, 0.0));
    }

    #[test]
    fn test_unknown_account_is_absent() {
        let body = br#"{"data": {"account": null}}"#;
        assert!(parse_positions(WALLET, body).unwrap().is_none());
    }

    #[test]
    fn test_missing_data_is_absent() {
        let body = br#"{"errors": [{"message": "indexing error"}]}"#;
        assert!(parse_positions(WALLET, body).unwrap().is_none());
    }

    #[test]
    fn test_unexpected_shape_is_absent() {
        let body = br#"{"data": {"account": {"tokens": "nope"}}}"#;
        assert!(parse_positions(WALLET, body).unwrap().is_none());

        let body = br#"[1, 2, 3]"#;
        assert!(parse_positions(WALLET, body).unwrap().is_none());
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = parse_positions(WALLET, b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, RiskScoreError::MalformedResponse { .. }));
    }

    #[test]
    fn test_negative_balance_is_zero() {
        assert_eq!(balance_from_json(Some(&json!("-3.5"))), 0.0);
        assert_eq!(balance_from_json(Some(&json!(" 7.5 "))), 7.5);
        assert_eq!(balance_from_json(None), 0.0);
    }
}
