//! Daily OHLC bar as returned by the market data boundary.

use chrono::NaiveDate;

/// One daily bar. The simulation consumes only `open` (trade execution) and
/// `close` (valuation); the remaining fields ride along from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fields() {
        let bar = OhlcBar {
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            open: 50.0,
            high: 52.0,
            low: 49.5,
            close: 51.0,
            volume: 1_000_000,
        };
        assert!((bar.open - 50.0).abs() < f64::EPSILON);
        assert!((bar.close - 51.0).abs() < f64::EPSILON);
    }
}
