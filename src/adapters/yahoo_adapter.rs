//! Yahoo Finance market data adapter.
//!
//! Single-attempt fetch against the v8 chart API; retry/backoff lives in
//! [`RetryingMarketData`](super::retrying_market_data::RetryingMarketData).
//! Yahoo has no official API and the response shape can change without
//! notice, so parsing failures map to `MarketDataError::Malformed`.

use chrono::{NaiveDate, NaiveTime};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::ohlc::OhlcBar;
use crate::ports::market_data_port::{MarketDataError, MarketDataPort};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

pub struct YahooAdapter {
    client: Client,
}

impl YahooAdapter {
    pub fn new(timeout: Duration) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MarketDataError::Request {
                ticker: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Chart API URL for a ticker and a [start, end) date window.
    fn chart_url(ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_ts = end.and_time(NaiveTime::MIN).and_utc().timestamp();
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?period1={start_ts}&period2={end_ts}&interval=1d"
        )
    }

    /// An empty bar list means "no data for this window", not an error.
    fn parse_response(ticker: &str, resp: ChartResponse) -> Result<Vec<OhlcBar>, MarketDataError> {
        let result = match resp.chart.result {
            Some(result) => result,
            None => {
                return match resp.chart.error {
                    // Unknown ticker behaves like an empty window.
                    Some(err) if err.code == "Not Found" => Ok(Vec::new()),
                    Some(err) => Err(MarketDataError::Malformed {
                        ticker: ticker.to_string(),
                        reason: format!("{}: {}", err.code, err.description),
                    }),
                    None => Err(MarketDataError::Malformed {
                        ticker: ticker.to_string(),
                        reason: "empty result with no error".to_string(),
                    }),
                };
            }
        };

        let Some(data) = result.into_iter().next() else {
            return Ok(Vec::new());
        };

        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data.indicators.quote.into_iter().next().ok_or_else(|| {
            MarketDataError::Malformed {
                ticker: ticker.to_string(),
                reason: "no quote data".to_string(),
            }
        })?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| MarketDataError::Malformed {
                    ticker: ticker.to_string(),
                    reason: format!("invalid timestamp: {ts}"),
                })?;

            let open = quote.open.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();

            // All-null rows are holidays/non-trading days.
            let (Some(open), Some(close)) = (open, close) else {
                continue;
            };

            bars.push(OhlcBar {
                date,
                open,
                high: quote.high.get(i).copied().flatten().unwrap_or(f64::NAN),
                low: quote.low.get(i).copied().flatten().unwrap_or(f64::NAN),
                close,
                volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
            });
        }

        Ok(bars)
    }
}

impl MarketDataPort for YahooAdapter {
    fn fetch_ohlc(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<OhlcBar>, MarketDataError> {
        let url = Self::chart_url(ticker, start, end);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| MarketDataError::Request {
                ticker: ticker.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                ticker: ticker.to_string(),
                reason: format!("HTTP {status}"),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::Request {
                ticker: ticker.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| MarketDataError::Malformed {
            ticker: ticker.to_string(),
            reason: format!("failed to parse response: {e}"),
        })?;

        Self::parse_response(ticker, chart)
    }
}
