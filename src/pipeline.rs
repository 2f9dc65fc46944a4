use tracing::info;

use crate::{
    models::{RiskScoreError, Result, ScoredWallet},
    scoring::{BatchRunner, ScoringAlgorithm, WalletFailure},
};

/// Result of one end-to-end scoring run
#[derive(Debug)]
pub struct ScoreReport {
    pub scored: Vec<ScoredWallet>,
    pub failures: Vec<WalletFailure>,
}

/// Extract every wallet, then score the survivors as one batch.
///
/// Returns `RiskScoreError::EmptyBatch` when no wallet could be extracted.
pub async fn score_wallets(
    runner: &BatchRunner,
    algorithm: &ScoringAlgorithm,
    wallet_ids: &[String],
) -> Result<ScoreReport> {
    let outcome = runner.run(wallet_ids).await;

    if outcome.metrics.is_empty() {
        return Err(RiskScoreError::EmptyBatch);
    }

    let scored = algorithm.score_batch(&outcome.metrics)?;
    info!(
        "Scored {} of {} wallets in {}ms",
        scored.len(),
        outcome.attempted(),
        (outcome.finished_at - outcome.started_at).num_milliseconds()
    );

    Ok(ScoreReport {
        scored,
        failures: outcome.failures,
    })
}
