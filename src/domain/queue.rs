//! Trading queue construction from sentiment records.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use super::calendar::{adjust_weekend_to_friday, next_trading_day};
use super::sentiment::SentimentRecord;

/// A trade awaiting execution: the sentiment value carries both direction
/// (sign) and notional size (magnitude).
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTrade {
    pub ticker: String,
    pub sentiment: f64,
}

/// Pending trades keyed by execution date, plus the full list of valuation
/// dates the simulation must walk. A date with no pending trades has no map
/// entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradingQueue {
    pending: BTreeMap<NaiveDate, Vec<PendingTrade>>,
    valuation_dates: Vec<NaiveDate>,
}

impl TradingQueue {
    /// Build the queue from records sorted ascending by day.
    ///
    /// Each record is scheduled for the next trading day after its sentiment
    /// day. Valuation dates are the union of every record day and every
    /// execution date, collapsed onto the preceding Friday where they land on
    /// a weekend, de-duplicated and sorted ascending.
    pub fn build(records: &[SentimentRecord]) -> Self {
        let mut pending: BTreeMap<NaiveDate, Vec<PendingTrade>> = BTreeMap::new();
        let mut all_dates: BTreeSet<NaiveDate> = BTreeSet::new();

        for record in records {
            let execution_date = next_trading_day(record.day);
            pending
                .entry(execution_date)
                .or_default()
                .push(PendingTrade {
                    ticker: record.ticker.clone(),
                    sentiment: record.refined_sentiment,
                });
            all_dates.insert(record.day);
            all_dates.insert(execution_date);
        }

        let valuation_dates: Vec<NaiveDate> = all_dates
            .into_iter()
            .map(adjust_weekend_to_friday)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            pending,
            valuation_dates,
        }
    }

    /// Trades due for execution on `date`, in sentiment-record order.
    pub fn trades_for(&self, date: NaiveDate) -> &[PendingTrade] {
        self.pending.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sorted, de-duplicated valuation dates.
    pub fn valuation_dates(&self) -> &[NaiveDate] {
        &self.valuation_dates
    }

    /// Execution dates that have at least one pending trade.
    pub fn execution_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.pending.keys().copied()
    }

    pub fn pending_trade_count(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }
}
