//! Aggregated sentiment records, the simulation's sole input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One per-ticker/per-day aggregate produced by the upstream sentiment
/// pipeline. `refined_sentiment` is interpreted as notional dollars: positive
/// opens or extends a long, zero or negative a short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub ticker: String,
    pub refined_sentiment: f64,
    pub day: NaiveDate,
}

/// Sort records ascending by day, preserving input order within a day.
pub fn sort_by_day(records: &mut [SentimentRecord]) {
    records.sort_by_key(|r| r.day);
}
