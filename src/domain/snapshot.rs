//! Persisted snapshot record types.
//!
//! Field names and shapes match the JSON consumed by the portfolio front end:
//! long valuation details omit `position_value`, short details include it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Short,
}

/// One executed trade as recorded in the day's snapshot. `shares` is the
/// absolute share count; `cost` is signed (negative for shorts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub ticker: String,
    pub action: TradeAction,
    pub shares: f64,
    pub price: f64,
    pub cost: f64,
}

/// Valuation detail for a long position on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongPositionDetail {
    pub shares: f64,
    pub close_price: f64,
    pub position_cost: f64,
    pub position_pnl: f64,
}

/// Valuation detail for a short position on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortPositionDetail {
    pub shares: f64,
    pub close_price: f64,
    pub position_value: f64,
    pub position_cost: f64,
    pub position_pnl: f64,
}

/// Per-side valuation details keyed by ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionsDetail {
    pub long: BTreeMap<String, LongPositionDetail>,
    pub short: BTreeMap<String, ShortPositionDetail>,
}

/// Full record of one valuation day: trades executed, positions marked, and
/// the day's and cumulative P&L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub trades: Vec<TradeRecord>,
    pub positions: PositionsDetail,
    pub today_profit: f64,
    pub total_profit: f64,
    pub total_investment: f64,
}

impl DailySnapshot {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            trades: Vec::new(),
            positions: PositionsDetail::default(),
            today_profit: 0.0,
            total_profit: 0.0,
            total_investment: 0.0,
        }
    }
}

/// Condensed per-day statistics for the consolidated history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsEntry {
    pub date: NaiveDate,
    pub investment: f64,
    pub today_profit: f64,
    pub total_profit: f64,
}

/// The consolidated history record written once at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHistory {
    pub daily_data: Vec<DailySnapshot>,
    pub portfolio_statistics: Vec<StatisticsEntry>,
    pub initial_investment_date: Option<NaiveDate>,
    pub total_investment: f64,
}
