pub mod models;
pub mod config;
pub mod sources;
pub mod scoring;
pub mod io;
pub mod pipeline;

pub use models::{WalletMetrics, TokenPosition, ScoredWallet, RiskScoreError, Result};
pub use config::Settings;
pub use pipeline::{score_wallets, ScoreReport};
