pub mod algorithm;
pub mod weights;
pub mod extractor;
pub mod batch;

pub use algorithm::{score, BatchRanges, FieldRange, ScoringAlgorithm};
pub use weights::ScoringWeights;
pub use extractor::MetricsExtractor;
pub use batch::{BatchOutcome, BatchRunner, WalletFailure};
