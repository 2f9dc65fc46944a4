use serde::{Deserialize, Serialize};

/// Relative contribution of each normalized metric to the composite score.
///
/// Ratio and borrow are inverted before weighting, so less leverage and less
/// debt raise the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub borrow_supply_ratio: f64,
    pub total_supply: f64,
    pub net_position: f64,
    pub total_borrow: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            borrow_supply_ratio: 0.4,
            total_supply: 0.2,
            net_position: 0.3,
            total_borrow: 0.1,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.borrow_supply_ratio +
        self.total_supply +
        self.net_position +
        self.total_borrow
    }

    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            self.borrow_supply_ratio,
            self.total_supply,
            self.net_position,
            self.total_borrow,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("Scoring weights must be non-negative".to_string());
        }

        let total = self.total();
        if (total - 1.0).abs() > 1e-9 {
            return Err(format!("Scoring weights must sum to 1.0, got {}", total));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-12);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let weights = ScoringWeights {
            total_supply: 0.5,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
    }
}
