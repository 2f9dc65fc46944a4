use serde::{Deserialize, Serialize};

use super::WalletMetrics;

pub const MAX_SCORE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWallet {
    #[serde(flatten)]
    pub metrics: WalletMetrics,
    pub score: u32,
}

impl ScoredWallet {
    pub fn wallet_id(&self) -> &str {
        &self.metrics.wallet_id
    }
}
