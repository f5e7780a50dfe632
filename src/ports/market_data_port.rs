//! Market data access port trait.

use chrono::NaiveDate;

use crate::domain::ohlc::OhlcBar;

/// Errors at the market data boundary. Rate limiting is the only class the
/// retry layer considers transient; everything else is terminal for the call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    #[error("rate limited fetching {ticker}: {reason}")]
    RateLimited { ticker: String, reason: String },

    #[error("request failed for {ticker}: {reason}")]
    Request { ticker: String, reason: String },

    #[error("malformed response for {ticker}: {reason}")]
    Malformed { ticker: String, reason: String },
}

impl MarketDataError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, MarketDataError::RateLimited { .. })
    }
}

/// Port for historical daily OHLC data.
///
/// `start` is inclusive, `end` exclusive. An `Ok` with no bars means the
/// source had no data for the window; callers treat that as "skip", never as
/// fatal.
pub trait MarketDataPort {
    fn fetch_ohlc(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<OhlcBar>, MarketDataError>;
}
