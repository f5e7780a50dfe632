//! The portfolio simulation loop.
//!
//! Walks valuation dates in ascending order. On each date, pending trades
//! execute against that day's opening price, then every open position is
//! marked to that day's closing price. The cost basis rolls forward to the
//! marked value, so each day's profit is the increment since the last mark.

use chrono::{Days, NaiveDate};
use log::{info, warn};

use super::error::SentfolioError;
use super::ohlc::OhlcBar;
use super::portfolio::Portfolio;
use super::position::Side;
use super::queue::TradingQueue;
use super::snapshot::{
    DailySnapshot, LongPositionDetail, ShortPositionDetail, StatisticsEntry, TradeAction,
    TradeRecord,
};
use crate::ports::market_data_port::{MarketDataError, MarketDataPort};
use crate::ports::snapshot_port::SnapshotPort;

/// Where in the per-date cycle a skip happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    Execution,
    LongValuation,
    ShortValuation,
}

/// Why a ticker was skipped for one date/phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source returned no rows for the window (after any retries).
    NoData,
    /// The fetch failed outright with a non-retryable error.
    Fetch(String),
}

/// Structured record of a per-ticker skip. Skips never abort the run; they
/// are collected so callers and tests can assert on what was missed and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipEvent {
    pub date: NaiveDate,
    pub ticker: String,
    pub phase: SimulationPhase,
    pub reason: SkipReason,
}

/// Everything a completed run produced.
#[derive(Debug)]
pub struct SimulationReport {
    pub snapshots: Vec<DailySnapshot>,
    pub statistics: Vec<StatisticsEntry>,
    pub portfolio: Portfolio,
    pub skips: Vec<SkipEvent>,
}

impl SimulationReport {
    /// Cumulative marked-to-market profit over the whole run.
    pub fn cumulative_profit(&self) -> f64 {
        self.statistics.iter().map(|s| s.today_profit).sum()
    }
}

/// Run the simulation over every valuation date before `today`, persisting
/// one snapshot per date through `writer`.
///
/// Per-ticker fetch problems degrade to skips; only persistence failures are
/// fatal.
pub fn run_simulation(
    queue: &TradingQueue,
    market: &dyn MarketDataPort,
    writer: &dyn SnapshotPort,
    today: NaiveDate,
) -> Result<SimulationReport, SentfolioError> {
    let mut portfolio = Portfolio::new();
    let mut snapshots: Vec<DailySnapshot> = Vec::new();
    let mut statistics: Vec<StatisticsEntry> = Vec::new();
    let mut skips: Vec<SkipEvent> = Vec::new();

    for &date in queue.valuation_dates() {
        if date >= today {
            continue;
        }
        info!("processing date: {date}");

        let mut snapshot = DailySnapshot::new(date);
        execute_pending_trades(queue, market, date, &mut portfolio, &mut snapshot, &mut skips);

        let long_profit = value_long_positions(market, date, &mut portfolio, &mut snapshot, &mut skips);
        let short_profit =
            value_short_positions(market, date, &mut portfolio, &mut snapshot, &mut skips);

        snapshot.today_profit = long_profit + short_profit;
        portfolio.total_profit += snapshot.today_profit;
        snapshot.total_profit = portfolio.total_profit;
        snapshot.total_investment = portfolio.total_investment;

        writer.write_daily(&snapshot)?;

        info!(
            "{date}: invested ${:.2}, daily P&L ${:.2}, overall P&L ${:.2}",
            snapshot.total_investment, snapshot.today_profit, snapshot.total_profit
        );

        statistics.push(StatisticsEntry {
            date,
            investment: snapshot.total_investment,
            today_profit: snapshot.today_profit,
            total_profit: snapshot.total_profit,
        });
        snapshots.push(snapshot);
    }

    Ok(SimulationReport {
        snapshots,
        statistics,
        portfolio,
        skips,
    })
}

fn execute_pending_trades(
    queue: &TradingQueue,
    market: &dyn MarketDataPort,
    date: NaiveDate,
    portfolio: &mut Portfolio,
    snapshot: &mut DailySnapshot,
    skips: &mut Vec<SkipEvent>,
) {
    for trade in queue.trades_for(date) {
        let open_price = match fetch_first_bar(market, &trade.ticker, date) {
            Ok(Some(bar)) => bar.open,
            Ok(None) => {
                warn!("no price data for {} on {date}, trade skipped", trade.ticker);
                skips.push(SkipEvent {
                    date,
                    ticker: trade.ticker.clone(),
                    phase: SimulationPhase::Execution,
                    reason: SkipReason::NoData,
                });
                continue;
            }
            Err(err) => {
                warn!("fetch failed for {} on {date}: {err}", trade.ticker);
                skips.push(SkipEvent {
                    date,
                    ticker: trade.ticker.clone(),
                    phase: SimulationPhase::Execution,
                    reason: SkipReason::Fetch(err.to_string()),
                });
                continue;
            }
        };

        portfolio.ensure_ticker(&trade.ticker);
        if portfolio.initial_investment_date.is_none() {
            portfolio.initial_investment_date = Some(date);
        }

        // Sentiment magnitude is the notional committed; zero sentiment
        // shorts.
        let sentiment = trade.sentiment;
        let (side, action, shares_delta) = if sentiment <= 0.0 {
            (Side::Short, TradeAction::Short, -sentiment.abs() / open_price)
        } else {
            (Side::Long, TradeAction::Buy, sentiment / open_price)
        };
        portfolio.total_investment += sentiment.abs();

        let position = portfolio.book_mut(side).ensure(&trade.ticker);
        position.shares += shares_delta;
        position.cost_basis += shares_delta * open_price;

        info!(
            "{date}: {} {:.4} shares of {} at ${open_price:.2}",
            match action {
                TradeAction::Buy => "buy",
                TradeAction::Short => "short",
            },
            shares_delta.abs(),
            trade.ticker,
        );

        snapshot.trades.push(TradeRecord {
            ticker: trade.ticker.clone(),
            action,
            shares: shares_delta.abs(),
            price: open_price,
            cost: shares_delta * open_price,
        });
    }
}

fn value_long_positions(
    market: &dyn MarketDataPort,
    date: NaiveDate,
    portfolio: &mut Portfolio,
    snapshot: &mut DailySnapshot,
    skips: &mut Vec<SkipEvent>,
) -> f64 {
    let mut profit = 0.0;
    for ticker in portfolio.long.open_tickers() {
        let close_price = match checked_close(market, &ticker, date, SimulationPhase::LongValuation, skips)
        {
            Some(price) => price,
            None => continue,
        };

        let position = portfolio.long.ensure(&ticker);
        let position_value = position.shares * close_price;
        let position_cost = position.cost_basis;
        position.cost_basis = position_value;

        let position_pnl = position_value - position_cost;
        profit += position_pnl;

        snapshot.positions.long.insert(
            ticker,
            LongPositionDetail {
                shares: position.shares,
                close_price,
                position_cost,
                position_pnl,
            },
        );
    }
    profit
}

fn value_short_positions(
    market: &dyn MarketDataPort,
    date: NaiveDate,
    portfolio: &mut Portfolio,
    snapshot: &mut DailySnapshot,
    skips: &mut Vec<SkipEvent>,
) -> f64 {
    let mut profit = 0.0;
    for ticker in portfolio.short.open_tickers() {
        let close_price =
            match checked_close(market, &ticker, date, SimulationPhase::ShortValuation, skips) {
                Some(price) => price,
                None => continue,
            };

        let position = portfolio.short.ensure(&ticker);
        // Shares are negative, so the value is negative too.
        let position_value = position.shares * close_price;
        let position_cost = position.cost_basis;
        position.cost_basis = position_value;

        // Marked as cost minus value over the signed share count.
        let position_pnl = position_cost - position_value;
        profit += position_pnl;

        snapshot.positions.short.insert(
            ticker,
            ShortPositionDetail {
                shares: position.shares,
                close_price,
                position_value,
                position_cost,
                position_pnl,
            },
        );
    }
    profit
}

/// Fetch the close for a one-day window, recording a skip on miss.
fn checked_close(
    market: &dyn MarketDataPort,
    ticker: &str,
    date: NaiveDate,
    phase: SimulationPhase,
    skips: &mut Vec<SkipEvent>,
) -> Option<f64> {
    match fetch_first_bar(market, ticker, date) {
        Ok(Some(bar)) => Some(bar.close),
        Ok(None) => {
            warn!("no price data for {ticker} on {date}, position not marked");
            skips.push(SkipEvent {
                date,
                ticker: ticker.to_string(),
                phase,
                reason: SkipReason::NoData,
            });
            None
        }
        Err(err) => {
            warn!("fetch failed for {ticker} on {date}: {err}");
            skips.push(SkipEvent {
                date,
                ticker: ticker.to_string(),
                phase,
                reason: SkipReason::Fetch(err.to_string()),
            });
            None
        }
    }
}

/// The first row is authoritative when a one-day window returns several.
fn fetch_first_bar(
    market: &dyn MarketDataPort,
    ticker: &str,
    date: NaiveDate,
) -> Result<Option<OhlcBar>, MarketDataError> {
    let bars = market.fetch_ohlc(ticker, date, date + Days::new(1))?;
    Ok(bars.into_iter().next())
}
