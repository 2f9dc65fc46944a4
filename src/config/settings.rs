use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const COMPOUND_V2_SUBGRAPH: &str =
    "https://api.thegraph.com/subgraphs/name/graphprotocol/compound-v2";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub source: SourceSettings,
    pub batch: BatchSettings,
    pub io: IoSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Pause between consecutive subgraph queries.
    pub request_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoSettings {
    pub input_path: PathBuf,
    pub wallet_column: String,
    pub output_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Wallet Risk Scorer".to_string(),
                log_level: "info".to_string(),
            },
            source: SourceSettings {
                endpoint: COMPOUND_V2_SUBGRAPH.to_string(),
                timeout_seconds: 10,
            },
            batch: BatchSettings {
                request_delay_ms: 300,
            },
            io: IoSettings {
                input_path: PathBuf::from("wallets.csv"),
                wallet_column: "wallet_id".to_string(),
                output_path: PathBuf::from("wallet_scores.csv"),
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("WALLET_RISK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.batch.request_delay_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.source.endpoint.trim().is_empty() {
            return Err("Data source endpoint must not be empty".to_string());
        }

        if self.source.timeout_seconds == 0 {
            return Err("Data source timeout must be at least one second".to_string());
        }

        if self.io.wallet_column.trim().is_empty() {
            return Err("Wallet column name must not be empty".to_string());
        }

        Ok(())
    }
}
