//! Retry/backoff decorator for market data ports.
//!
//! Wraps any [`MarketDataPort`] and absorbs the two transient conditions the
//! upstream source exhibits: rate-limit rejections and sporadic empty
//! responses. Everything else passes through untouched on the first attempt.

use chrono::NaiveDate;
use log::warn;
use rand::Rng;
use std::time::Duration;

use crate::domain::ohlc::OhlcBar;
use crate::ports::market_data_port::{MarketDataError, MarketDataPort};

/// Bounded-attempt backoff parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Backoff before retrying after attempt number `attempt` (0-based):
    /// `base_delay * attempt`, so the first retry waits only for jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(60),
        }
    }
}

/// Sleep primitive, injectable so tests can observe backoff without waiting.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Production sleeper: blocks the simulation thread, deliberately throttling
/// the whole run to respect the source's rate limits.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

pub struct RetryingMarketData<P, S = ThreadSleeper> {
    inner: P,
    policy: RetryPolicy,
    sleeper: S,
}

impl<P: MarketDataPort> RetryingMarketData<P, ThreadSleeper> {
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self::with_sleeper(inner, policy, ThreadSleeper)
    }
}

impl<P: MarketDataPort, S: Sleeper> RetryingMarketData<P, S> {
    pub fn with_sleeper(inner: P, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            inner,
            policy,
            sleeper,
        }
    }

    fn backoff(&self, attempt: u32, ticker: &str, cause: &str) {
        let jitter = Duration::from_secs_f64(rand::thread_rng().gen_range(0.0..1.0));
        let delay = self.policy.delay_for(attempt) + jitter;
        warn!(
            "{cause} for {ticker}, retrying in {:.2}s (attempt {}/{})",
            delay.as_secs_f64(),
            attempt + 1,
            self.policy.max_attempts
        );
        self.sleeper.sleep(delay);
    }
}

impl<P: MarketDataPort, S: Sleeper> MarketDataPort for RetryingMarketData<P, S> {
    fn fetch_ohlc(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<OhlcBar>, MarketDataError> {
        for attempt in 0..self.policy.max_attempts {
            match self.inner.fetch_ohlc(ticker, start, end) {
                Ok(bars) if !bars.is_empty() => return Ok(bars),
                Ok(_) => self.backoff(attempt, ticker, "empty data"),
                Err(err) if err.is_rate_limited() => self.backoff(attempt, ticker, "rate limit"),
                Err(err) => return Err(err),
            }
        }

        warn!("max retries reached for {ticker} on {start}");
        Ok(Vec::new())
    }
}
