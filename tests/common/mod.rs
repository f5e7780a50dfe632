#![allow(dead_code)]

use chrono::NaiveDate;
use sentfolio::domain::error::SentfolioError;
use sentfolio::domain::ohlc::OhlcBar;
use sentfolio::domain::sentiment::SentimentRecord;
use sentfolio::domain::snapshot::{DailySnapshot, PortfolioHistory};
use sentfolio::ports::market_data_port::{MarketDataError, MarketDataPort};
use sentfolio::ports::snapshot_port::SnapshotPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn record(ticker: &str, sentiment: f64, day: NaiveDate) -> SentimentRecord {
    SentimentRecord {
        ticker: ticker.to_string(),
        refined_sentiment: sentiment,
        day,
    }
}

/// Deterministic market data keyed by ticker and window start date.
pub struct MockMarketData {
    bars: HashMap<(String, NaiveDate), OhlcBar>,
    errors: HashMap<String, MarketDataError>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            bars: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, ticker: &str, day: NaiveDate, open: f64, close: f64) -> Self {
        self.bars.insert(
            (ticker.to_string(), day),
            OhlcBar {
                date: day,
                open,
                high: open.max(close),
                low: open.min(close),
                close,
                volume: 1_000,
            },
        );
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(
            ticker.to_string(),
            MarketDataError::Request {
                ticker: ticker.to_string(),
                reason: reason.to_string(),
            },
        );
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn fetch_ohlc(
        &self,
        ticker: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<OhlcBar>, MarketDataError> {
        if let Some(err) = self.errors.get(ticker) {
            return Err(err.clone());
        }
        Ok(self
            .bars
            .get(&(ticker.to_string(), start))
            .cloned()
            .into_iter()
            .collect())
    }
}

/// Snapshot writer that keeps everything in memory for assertions.
#[derive(Default)]
pub struct CollectingWriter {
    pub daily: RefCell<Vec<DailySnapshot>>,
    pub history: RefCell<Option<PortfolioHistory>>,
}

impl CollectingWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotPort for CollectingWriter {
    fn write_daily(&self, snapshot: &DailySnapshot) -> Result<(), SentfolioError> {
        self.daily.borrow_mut().push(snapshot.clone());
        Ok(())
    }

    fn write_history(&self, history: &PortfolioHistory) -> Result<(), SentfolioError> {
        *self.history.borrow_mut() = Some(history.clone());
        Ok(())
    }
}

/// Snapshot writer that always fails, for persistence-error tests.
pub struct FailingWriter;

impl SnapshotPort for FailingWriter {
    fn write_daily(&self, _snapshot: &DailySnapshot) -> Result<(), SentfolioError> {
        Err(SentfolioError::Io(std::io::Error::other("disk full")))
    }

    fn write_history(&self, _history: &PortfolioHistory) -> Result<(), SentfolioError> {
        Err(SentfolioError::Io(std::io::Error::other("disk full")))
    }
}
