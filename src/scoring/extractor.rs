use std::sync::Arc;
use tracing::debug;

use crate::{
    models::{Result, WalletMetrics},
    sources::PositionSource,
};

/// Turns one wallet's protocol positions into a `WalletMetrics` record.
pub struct MetricsExtractor {
    source: Arc<dyn PositionSource>,
}

impl MetricsExtractor {
    pub fn new(source: Arc<dyn PositionSource>) -> Self {
        Self { source }
    }

    pub async fn extract(&self, wallet_id: &str) -> Result<WalletMetrics> {
        let positions = self.source.query_positions(wallet_id).await?.unwrap_or_else(|| {
            debug!("No positions reported for {}, using zero balances", wallet_id);
            Vec::new()
        });

        Ok(WalletMetrics::from_positions(wallet_id, &positions))
    }
}
