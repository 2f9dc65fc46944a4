use anyhow::Context;
use clap::{Parser, Subcommand};
use wallet_risk_scorer::{
    config::Settings,
    io,
    models::RiskScoreError,
    scoring::{BatchRunner, MetricsExtractor, ScoringAlgorithm, ScoringWeights},
    sources::{PositionSource, SourceConfig, SubgraphClient},
    score_wallets,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "wallet-risk")]
#[clap(about = "Score lending-protocol wallets by credit risk", long_about = None)]
struct Cli {
    /// Explicit configuration file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every wallet in an input file
    Score {
        /// CSV file with a wallet column
        #[clap(short, long)]
        input: Option<PathBuf>,

        /// Where to write wallet_id,score rows
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Name of the wallet column
        #[clap(long)]
        column: Option<String>,

        /// Pause between subgraph queries in milliseconds
        #[clap(long)]
        delay_ms: Option<u64>,

        /// Subgraph endpoint
        #[clap(long)]
        endpoint: Option<String>,
    },

    /// Show the raw metrics for one wallet
    Inspect {
        /// Wallet address
        #[clap(short, long)]
        wallet: String,

        /// Subgraph endpoint
        #[clap(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Settings::new().context("Failed to load configuration")?,
    };

    match &cli.command {
        Commands::Score { input, output, column, delay_ms, endpoint } => {
            if let Some(input) = input {
                settings.io.input_path = input.clone();
            }
            if let Some(output) = output {
                settings.io.output_path = output.clone();
            }
            if let Some(column) = column {
                settings.io.wallet_column = column.clone();
            }
            if let Some(delay_ms) = delay_ms {
                settings.batch.request_delay_ms = *delay_ms;
            }
            if let Some(endpoint) = endpoint {
                settings.source.endpoint = endpoint.clone();
            }
        }
        Commands::Inspect { endpoint, .. } => {
            if let Some(endpoint) = endpoint {
                settings.source.endpoint = endpoint.clone();
            }
        }
    }

    init_logging(&settings.app.log_level);

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let source: Arc<dyn PositionSource> = Arc::new(
        SubgraphClient::new(SourceConfig::from(&settings))?
    );
    info!("Using {} at {}", source.name(), settings.source.endpoint);

    match cli.command {
        Commands::Score { .. } => run_score(&settings, source).await,
        Commands::Inspect { wallet, .. } => run_inspect(source, &wallet).await,
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run_score(settings: &Settings, source: Arc<dyn PositionSource>) -> anyhow::Result<()> {
    let wallets = io::read_wallet_ids(&settings.io.input_path, &settings.io.wallet_column)
        .with_context(|| format!("Failed to read wallets from {}", settings.io.input_path.display()))?;

    let runner = BatchRunner::new(MetricsExtractor::new(source), settings.request_delay());
    let algorithm = ScoringAlgorithm::new(ScoringWeights::default())?;

    let report = match score_wallets(&runner, &algorithm, &wallets).await {
        Ok(report) => report,
        Err(RiskScoreError::EmptyBatch) => {
            error!("No wallets could be extracted, nothing to score");
            return Err(RiskScoreError::EmptyBatch.into());
        }
        Err(e) => return Err(e.into()),
    };

    io::export_scores(&settings.io.output_path, &report.scored)
        .with_context(|| format!("Failed to write scores to {}", settings.io.output_path.display()))?;

    println!("\n=== Wallet Risk Scores ===");
    println!("Scored: {}", report.scored.len());
    println!("Failed: {}", report.failures.len());
    for failure in &report.failures {
        println!("  {}: {}", failure.wallet_id, failure.error);
    }
    println!("Output: {}", settings.io.output_path.display());

    Ok(())
}

async fn run_inspect(source: Arc<dyn PositionSource>, wallet: &str) -> anyhow::Result<()> {
    let wallet = wallet.trim().to_lowercase();
    let extractor = MetricsExtractor::new(source);

    let metrics = extractor
        .extract(&wallet)
        .await
        .with_context(|| format!("Failed to extract metrics for {}", wallet))?;

    println!("\n=== Wallet Metrics ===");
    println!("Wallet: {}", metrics.wallet_id);
    println!("Total supply: {:.6}", metrics.total_supply);
    println!("Total borrow: {:.6}", metrics.total_borrow);
    println!("Net position: {:.6}", metrics.net_position);
    println!("Borrow/supply ratio: {:.4}", metrics.borrow_supply_ratio);

    Ok(())
}
