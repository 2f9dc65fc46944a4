use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use wallet_risk_scorer::{
    io,
    models::{RiskScoreError, Result, TokenPosition},
    scoring::{BatchRunner, MetricsExtractor, ScoringAlgorithm},
    sources::PositionSource,
    score_wallets,
};

/// In-memory protocol: known wallets return positions, `0xdead` is unreachable,
/// everything else is unknown to the protocol.
struct FakeSource {
    positions: HashMap<String, Vec<TokenPosition>>,
}

impl FakeSource {
    fn new() -> Self {
        let mut positions = HashMap::new();
        positions.insert(
            "0xsaver".to_string(),
            vec![TokenPosition::new("cDAI", 10_000.0, 0.0)],
        );
        positions.insert(
            "0xlevered".to_string(),
            vec![
                TokenPosition::new("cETH", 1_000.0, 0.0),
                TokenPosition::new("cUSDC", 0.0, 1_800.0),
            ],
        );
        positions.insert(
            "0xmoderate".to_string(),
            vec![TokenPosition::new("cUSDC", 4_000.0, 1_000.0)],
        );
        Self { positions }
    }
}

#[async_trait]
impl PositionSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn query_positions(&self, wallet_id: &str) -> Result<Option<Vec<TokenPosition>>> {
        if wallet_id == "0xdead" {
            return Err(RiskScoreError::DataSource {
                wallet: wallet_id.to_string(),
                message: "Unexpected status 503 Service Unavailable".to_string(),
            });
        }
        Ok(self.positions.get(wallet_id).cloned())
    }
}

fn runner() -> BatchRunner {
    BatchRunner::new(MetricsExtractor::new(Arc::new(FakeSource::new())), Duration::ZERO)
}

#[tokio::test]
async fn test_end_to_end_scoring() {
    let csv = "wallet_id\n0xSAVER\n0xdead\n0xLevered\n0xmoderate\n0xnobody\n";
    let wallets = io::parse_wallet_ids(csv, "wallet_id").unwrap();

    let report = score_wallets(&runner(), &ScoringAlgorithm::default(), &wallets)
        .await
        .unwrap();

    let ids: Vec<&str> = report.scored.iter().map(|s| s.wallet_id()).collect();
    assert_eq!(ids, vec!["0xsaver", "0xlevered", "0xmoderate", "0xnobody"]);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].wallet_id, "0xdead");

    for s in &report.scored {
        assert!(s.score <= 1000);
        assert!((0.0..=2.0).contains(&s.metrics.borrow_supply_ratio));
    }

    let score_of = |id: &str| report.scored.iter().find(|s| s.wallet_id() == id).unwrap().score;
    assert!(score_of("0xsaver") > score_of("0xmoderate"));
    assert!(score_of("0xmoderate") > score_of("0xlevered"));
    assert!(score_of("0xmoderate") > score_of("0xnobody"));

    let nobody = report.scored.iter().find(|s| s.wallet_id() == "0xnobody").unwrap();
    assert_eq!(nobody.metrics.borrow_supply_ratio, 2.0);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("wallet_scores.csv");
    io::export_scores(&out, &report.scored).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("wallet_id,score"));
    assert_eq!(lines.count(), 4);
}

#[tokio::test]
async fn test_no_wallets_is_empty_batch() {
    let err = score_wallets(&runner(), &ScoringAlgorithm::default(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RiskScoreError::EmptyBatch));
}

#[tokio::test]
async fn test_all_wallets_failing_is_empty_batch() {
    let wallets = vec!["0xdead".to_string()];
    let err = score_wallets(&runner(), &ScoringAlgorithm::default(), &wallets)
        .await
        .unwrap_err();
    assert!(matches!(err, RiskScoreError::EmptyBatch));
}
