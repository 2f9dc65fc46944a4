use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::models::{Result, ScoredWallet};

pub const SCORE_HEADER: &str = "wallet_id,score";

/// Write `wallet_id,score` rows in the order given.
pub fn write_scores<W: Write>(writer: &mut W, scored: &[ScoredWallet]) -> std::io::Result<()> {
    writeln!(writer, "{}", SCORE_HEADER)?;
    for wallet in scored {
        writeln!(writer, "{},{}", wallet.wallet_id(), wallet.score)?;
    }
    writer.flush()
}

pub fn export_scores<P: AsRef<Path>>(path: P, scored: &[ScoredWallet]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    write_scores(&mut writer, scored)?;

    info!("Wrote {} scores to {}", scored.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WalletMetrics;

    fn scored(id: &str, score: u32) -> ScoredWallet {
        ScoredWallet {
            metrics: WalletMetrics::from_totals(id, 1.0, 0.0),
            score,
        }
    }

    #[test]
    fn test_writes_header_and_rows_in_order() {
        let mut out = Vec::new();
        write_scores(&mut out, &[scored("0xb", 420), scored("0xa", 7)]).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "wallet_id,score\n0xb,420\n0xa,7\n");
    }

    #[test]
    fn test_export_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("wallet_scores.csv");

        export_scores(&path, &[scored("0xa", 1000)]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "wallet_id,score\n0xa,1000\n");
    }
}
