use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::{
    models::{RiskScoreError, WalletMetrics},
    scoring::MetricsExtractor,
};

/// A wallet dropped from the batch and why.
#[derive(Debug)]
pub struct WalletFailure {
    pub wallet_id: String,
    pub error: RiskScoreError,
}

#[derive(Debug)]
pub struct BatchOutcome {
    /// Successfully extracted wallets, in input order
    pub metrics: Vec<WalletMetrics>,
    pub failures: Vec<WalletFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchOutcome {
    pub fn attempted(&self) -> usize {
        self.metrics.len() + self.failures.len()
    }
}

/// Runs the extractor over a wallet list one wallet at a time.
pub struct BatchRunner {
    extractor: MetricsExtractor,
    request_delay: Duration,
}

impl BatchRunner {
    pub fn new(extractor: MetricsExtractor, request_delay: Duration) -> Self {
        Self {
            extractor,
            request_delay,
        }
    }

    /// Never fails as a whole: a wallet whose extraction errors is recorded in
    /// `failures` and left out of `metrics`.
    pub async fn run(&self, wallet_ids: &[String]) -> BatchOutcome {
        let started_at = Utc::now();
        let total = wallet_ids.len();
        let mut metrics = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (i, wallet_id) in wallet_ids.iter().enumerate() {
            if i > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            info!("[{}/{}] Processing {}", i + 1, total, wallet_id);

            match self.extractor.extract(wallet_id).await {
                Ok(m) => metrics.push(m),
                Err(e) => {
                    if e.is_wallet_recoverable() {
                        warn!("Error with wallet {}: {}", wallet_id, e);
                    } else {
                        error!("Unexpected error with wallet {}: {}", wallet_id, e);
                    }
                    failures.push(WalletFailure {
                        wallet_id: wallet_id.clone(),
                        error: e,
                    });
                }
            }
        }

        info!(
            "Batch finished: {} extracted, {} failed",
            metrics.len(),
            failures.len()
        );

        BatchOutcome {
            metrics,
            failures,
            started_at,
            finished_at: Utc::now(),
        }
    }
}
