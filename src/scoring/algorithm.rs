use crate::{
    models::{RiskScoreError, Result, ScoredWallet, WalletMetrics, MAX_SCORE},
    scoring::ScoringWeights,
};

/// Observed spread of one metric across a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    fn observe<I: IntoIterator<Item = f64>>(values: I) -> Self {
        values.into_iter().fold(
            Self { min: f64::INFINITY, max: f64::NEG_INFINITY },
            |range, v| Self { min: range.min.min(v), max: range.max.max(v) },
        )
    }

    /// Min-max scale into `[0, 1]`. `None` when every wallet shares the same value.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        let span = self.max - self.min;
        if span > 0.0 {
            Some(((value - self.min) / span).clamp(0.0, 1.0))
        } else {
            None
        }
    }
}

/// Per-batch ranges for the four scored metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchRanges {
    pub total_supply: FieldRange,
    pub total_borrow: FieldRange,
    pub net_position: FieldRange,
    pub borrow_supply_ratio: FieldRange,
}

impl BatchRanges {
    pub fn from_metrics(all: &[WalletMetrics]) -> Result<Self> {
        if all.is_empty() {
            return Err(RiskScoreError::EmptyBatch);
        }

        Ok(Self {
            total_supply: FieldRange::observe(all.iter().map(|m| m.total_supply)),
            total_borrow: FieldRange::observe(all.iter().map(|m| m.total_borrow)),
            net_position: FieldRange::observe(all.iter().map(|m| m.net_position)),
            borrow_supply_ratio: FieldRange::observe(all.iter().map(|m| m.borrow_supply_ratio)),
        })
    }
}

pub struct ScoringAlgorithm {
    weights: ScoringWeights,
}

impl Default for ScoringAlgorithm {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }
}

impl ScoringAlgorithm {
    /// Rejects weights that are negative or do not sum to 1.0.
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate().map_err(RiskScoreError::Config)?;
        Ok(Self { weights })
    }

    /// Score a whole batch. Ranges are recomputed on every call and nothing is
    /// retained, so the same input always yields the same scores.
    pub fn score_batch(&self, all: &[WalletMetrics]) -> Result<Vec<ScoredWallet>> {
        let ranges = BatchRanges::from_metrics(all)?;

        Ok(all
            .iter()
            .map(|metrics| ScoredWallet {
                metrics: metrics.clone(),
                score: to_score(self.composite(metrics, &ranges)),
            })
            .collect())
    }

    /// Weighted composite in `[0, 1]`.
    pub fn composite(&self, metrics: &WalletMetrics, ranges: &BatchRanges) -> f64 {
        let w = &self.weights;

        let composite =
            w.borrow_supply_ratio * inverted(ranges.borrow_supply_ratio.normalize(metrics.borrow_supply_ratio)) +
            w.total_supply * direct(ranges.total_supply.normalize(metrics.total_supply)) +
            w.net_position * direct(ranges.net_position.normalize(metrics.net_position)) +
            w.total_borrow * inverted(ranges.total_borrow.normalize(metrics.total_borrow));

        composite.clamp(0.0, 1.0)
    }
}

// A field with no spread across the batch carries no information and
// contributes nothing, whichever direction it is weighted in.
fn direct(normalized: Option<f64>) -> f64 {
    normalized.unwrap_or(0.0)
}

/// `1 - n` for a field with spread. A field with no spread yields 0 here
/// rather than the literal `1 - 0`, so a batch with no variation scores 0.
fn inverted(normalized: Option<f64>) -> f64 {
    normalized.map_or(0.0, |n| 1.0 - n)
}

/// Truncate to an integer band, never rounding up.
fn to_score(composite: f64) -> u32 {
    let scaled = (composite.clamp(0.0, 1.0) * f64::from(MAX_SCORE)).floor();
    (scaled as u32).min(MAX_SCORE)
}

/// Score a batch with the standard weights.
pub fn score(all: &[WalletMetrics]) -> Result<Vec<ScoredWallet>> {
    ScoringAlgorithm::default().score_batch(all)
}
