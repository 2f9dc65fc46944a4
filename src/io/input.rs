use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::models::{RiskScoreError, Result};

/// Read wallet ids from the named column of a comma-separated file.
pub fn read_wallet_ids<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let wallets = parse_wallet_ids(&contents, column)?;

    info!("Loaded {} wallets from {}", wallets.len(), path.display());
    Ok(wallets)
}

/// Ids are lowercased, blanks skipped, and repeats keep their first position.
pub fn parse_wallet_ids(contents: &str, column: &str) -> Result<Vec<String>> {
    let mut lines = contents.lines().filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .map(|line| line.trim_start_matches('\u{feff}'))
        .ok_or_else(|| RiskScoreError::InvalidInput("Wallet file is empty".to_string()))?;

    let wanted = column.trim().to_lowercase();
    let index = split_row(header)
        .iter()
        .position(|name| name.to_lowercase() == wanted)
        .ok_or_else(|| RiskScoreError::InvalidInput(format!("Missing column '{}'", column)))?;

    let mut seen = HashSet::new();
    let mut wallets = Vec::new();

    for (row, line) in lines.enumerate() {
        let Some(cell) = split_row(line).into_iter().nth(index) else {
            warn!("Row {} has no '{}' value, skipping", row + 2, column);
            continue;
        };

        let wallet = cell.to_lowercase();
        if wallet.is_empty() {
            continue;
        }

        if seen.insert(wallet.clone()) {
            wallets.push(wallet);
        } else {
            warn!("Duplicate wallet {} ignored", wallet);
        }
    }

    Ok(wallets)
}

/// Split one record on commas outside double quotes. `""` inside a quoted
/// cell is a literal quote.
fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());

    cells
}
