//! Portfolio state owned by the simulation loop.

use chrono::NaiveDate;

use super::position::{PositionBook, Side};

/// The full mutable state of a simulation run: one position book per side,
/// cumulative notional committed, and running profit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    pub long: PositionBook,
    pub short: PositionBook,
    /// Total notional dollars committed across the whole run (sentiment
    /// magnitude summed over every executed trade).
    pub total_investment: f64,
    /// Running sum of daily marked-to-market profit.
    pub total_profit: f64,
    /// Date of the first successfully executed trade.
    pub initial_investment_date: Option<NaiveDate>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize `ticker` in BOTH side books if not yet seen. The side never
    /// traded keeps a flat entry; flat entries are skipped at valuation, so
    /// this only affects internal bookkeeping, never persisted output.
    pub fn ensure_ticker(&mut self, ticker: &str) {
        self.long.ensure(ticker);
        self.short.ensure(ticker);
    }

    pub fn book(&self, side: Side) -> &PositionBook {
        match side {
            Side::Long => &self.long,
            Side::Short => &self.short,
        }
    }

    pub fn book_mut(&mut self, side: Side) -> &mut PositionBook {
        match side {
            Side::Long => &mut self.long,
            Side::Short => &mut self.short,
        }
    }
}
