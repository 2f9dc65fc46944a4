use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::models::{Result, TokenPosition};

/// Read-only access to a lending protocol's per-wallet positions.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Human readable name used in logs
    fn name(&self) -> &str;

    /// Fetch the token positions held by `wallet_id`.
    ///
    /// `Ok(None)` means the protocol knows nothing about the wallet, which callers
    /// treat as zero balances. Transport and status failures are
    /// `RiskScoreError::DataSource`; an unparseable body is
    /// `RiskScoreError::MalformedResponse`.
    async fn query_positions(&self, wallet_id: &str) -> Result<Option<Vec<TokenPosition>>>;
}

/// Configuration for position sources
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl From<&crate::config::Settings> for SourceConfig {
    fn from(settings: &crate::config::Settings) -> Self {
        Self {
            endpoint: settings.source.endpoint.clone(),
            timeout_seconds: settings.source.timeout_seconds,
        }
    }
}
