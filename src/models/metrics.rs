use serde::{Deserialize, Serialize};

/// Ratio assigned to a wallet with nothing supplied.
pub const ZERO_SUPPLY_RATIO: f64 = 2.0;

/// Upper bound applied to every borrow/supply ratio.
pub const MAX_BORROW_SUPPLY_RATIO: f64 = 2.0;

/// One token position as reported by the lending protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPosition {
    pub symbol: String,
    pub supplied: f64,
    pub borrowed: f64,
}

impl TokenPosition {
    pub fn new(symbol: impl Into<String>, supplied: f64, borrowed: f64) -> Self {
        Self {
            symbol: symbol.into(),
            supplied,
            borrowed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletMetrics {
    pub wallet_id: String,
    pub total_supply: f64,
    pub total_borrow: f64,
    pub net_position: f64,
    pub borrow_supply_ratio: f64,
}

impl WalletMetrics {
    /// Aggregate a wallet's token positions. An empty slice yields zero balances.
    pub fn from_positions(wallet_id: impl Into<String>, positions: &[TokenPosition]) -> Self {
        let (total_supply, total_borrow) = positions.iter().fold((0.0, 0.0), |(s, b), p| {
            (s + sanitize_balance(p.supplied), b + sanitize_balance(p.borrowed))
        });

        Self::from_totals(wallet_id, total_supply, total_borrow)
    }

    pub fn from_totals(wallet_id: impl Into<String>, total_supply: f64, total_borrow: f64) -> Self {
        let total_supply = sanitize_balance(total_supply);
        let total_borrow = sanitize_balance(total_borrow);

        Self {
            wallet_id: wallet_id.into(),
            total_supply,
            total_borrow,
            net_position: total_supply - total_borrow,
            borrow_supply_ratio: borrow_supply_ratio(total_supply, total_borrow),
        }
    }
}

/// Leverage proxy in `[0, MAX_BORROW_SUPPLY_RATIO]`.
///
/// A wallet with no supply gets the fixed `ZERO_SUPPLY_RATIO` sentinel. The cap is
/// applied afterwards to both branches, so the sentinel is bounded as well.
pub fn borrow_supply_ratio(total_supply: f64, total_borrow: f64) -> f64 {
    let raw = if total_supply > 0.0 {
        total_borrow / total_supply
    } else {
        ZERO_SUPPLY_RATIO
    };

    raw.clamp(0.0, MAX_BORROW_SUPPLY_RATIO)
}

/// Balances are non-negative; anything else counts as nothing held.
pub fn sanitize_balance(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
