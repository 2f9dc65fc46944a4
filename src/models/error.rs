use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskScoreError {
    #[error("Data source error for {wallet}: {message}")]
    DataSource { wallet: String, message: String },

    #[error("Malformed response for {wallet}: {message}")]
    MalformedResponse { wallet: String, message: String },

    #[error("Cannot score an empty batch")]
    EmptyBatch,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RiskScoreError {
    /// Errors that only affect a single wallet and are contained by the batch runner.
    pub fn is_wallet_recoverable(&self) -> bool {
        matches!(
            self,
            RiskScoreError::DataSource { .. } | RiskScoreError::MalformedResponse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RiskScoreError>;
