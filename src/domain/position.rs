//! Per-ticker position tracking with rolling cost basis.

use std::collections::BTreeMap;

/// Position side. Longs carry non-negative share counts, shorts non-positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Long,
    Short,
}

/// A single per-ticker holding on one side of the book.
///
/// `cost_basis` is a rolling mark: it is reset to the position's market value
/// at every valuation, so each day's P&L is the increment since the previous
/// mark rather than the gain since original entry.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub shares: f64,
    pub cost_basis: f64,
}

impl Position {
    pub fn is_flat(&self) -> bool {
        self.shares == 0.0
    }
}

/// One side's positions, keyed by ticker. Entries are inserted on first
/// reference and never removed; flat tickers are skipped at valuation time.
/// Ticker ordering is deterministic so persisted snapshots reproduce exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionBook {
    positions: BTreeMap<String, Position>,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a zero position for `ticker` if absent and return it mutably.
    pub fn ensure(&mut self, ticker: &str) -> &mut Position {
        self.positions.entry(ticker.to_string()).or_default()
    }

    pub fn get(&self, ticker: &str) -> Option<&Position> {
        self.positions.get(ticker)
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.positions.contains_key(ticker)
    }

    /// All entries in ticker order, including flat ones.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Position)> {
        self.positions.iter()
    }

    /// Tickers currently holding shares, in ticker order.
    pub fn open_tickers(&self) -> Vec<String> {
        self.positions
            .iter()
            .filter(|(_, p)| !p.is_flat())
            .map(|(t, _)| t.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
