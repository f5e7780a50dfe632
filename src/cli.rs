//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_sentiment_adapter::JsonSentimentAdapter;
use crate::adapters::json_snapshot_adapter::JsonSnapshotAdapter;
use crate::adapters::retrying_market_data::{RetryPolicy, RetryingMarketData};
use crate::adapters::yahoo_adapter::YahooAdapter;
use crate::domain::config_validation::validate_simulation_config;
use crate::domain::error::SentfolioError;
use crate::domain::queue::TradingQueue;
use crate::domain::simulator::{run_simulation, SimulationReport};
use crate::domain::snapshot::PortfolioHistory;
use crate::ports::config_port::ConfigPort;
use crate::ports::sentiment_port::SentimentPort;
use crate::ports::snapshot_port::SnapshotPort;

#[derive(Parser, Debug)]
#[command(name = "sentfolio", about = "Sentiment-driven long/short portfolio simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the simulation end to end and persist snapshots
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the sentiment input file from the config
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Override the snapshot output directory from the config
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Simulate as if run on this date (dates on or after it are skipped)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Print the trading queue and valuation dates without fetching prices
    Queue {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            input,
            output,
            as_of,
        } => run_simulate(&config, input.as_ref(), output.as_ref(), as_of),
        Command::Queue { config, input } => run_queue(&config, input.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SentfolioError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Retry/backoff parameters from the `[fetch]` section.
pub fn build_retry_policy(config: &dyn ConfigPort) -> RetryPolicy {
    RetryPolicy {
        max_attempts: config.get_int("fetch", "max_attempts", 5) as u32,
        base_delay: Duration::from_secs_f64(config.get_double("fetch", "base_delay_secs", 60.0)),
    }
}

/// The simulation's "today": the CLI flag wins, then `[simulation] as_of`,
/// then the current local date.
pub fn resolve_as_of(
    flag: Option<NaiveDate>,
    config: &dyn ConfigPort,
) -> Result<NaiveDate, SentfolioError> {
    if let Some(date) = flag {
        return Ok(date);
    }
    match config.get_string("simulation", "as_of") {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| SentfolioError::InvalidDate { value: s }),
        None => Ok(Local::now().date_naive()),
    }
}

fn resolve_path(
    flag: Option<&PathBuf>,
    config: &dyn ConfigPort,
    key: &str,
) -> Result<PathBuf, SentfolioError> {
    if let Some(path) = flag {
        return Ok(path.clone());
    }
    config
        .get_string("simulation", key)
        .map(PathBuf::from)
        .ok_or_else(|| SentfolioError::ConfigMissing {
            section: "simulation".into(),
            key: key.into(),
        })
}

fn run_simulate(
    config_path: &PathBuf,
    input_override: Option<&PathBuf>,
    output_override: Option<&PathBuf>,
    as_of_flag: Option<NaiveDate>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let input = match resolve_path(input_override, &config, "input") {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let output = match resolve_path(output_override, &config, "output_dir") {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let as_of = match resolve_as_of(as_of_flag, &config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading sentiment records from {}", input.display());
    let records = match JsonSentimentAdapter::new(&input).load() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let queue = TradingQueue::build(&records);
    eprintln!(
        "Queued {} trades over {} valuation dates (as of {as_of})",
        queue.pending_trade_count(),
        queue.valuation_dates().len(),
    );

    let timeout = Duration::from_secs(config.get_int("fetch", "timeout_secs", 30) as u64);
    let yahoo = match YahooAdapter::new(timeout) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    };
    let market = RetryingMarketData::new(yahoo, build_retry_policy(&config));

    let writer = match JsonSnapshotAdapter::new(&output) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let report = match run_simulation(&queue, &market, &writer, as_of) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let history = PortfolioHistory {
        daily_data: report.snapshots.clone(),
        portfolio_statistics: report.statistics.clone(),
        initial_investment_date: report.portfolio.initial_investment_date,
        total_investment: report.portfolio.total_investment,
    };
    if let Err(e) = writer.write_history(&history) {
        eprintln!("error: failed to write history: {e}");
        return (&e).into();
    }
    eprintln!(
        "Saved {} daily snapshots and history to {}",
        report.snapshots.len(),
        output.display()
    );

    print_summary(&report);
    ExitCode::SUCCESS
}

fn print_summary(report: &SimulationReport) {
    eprintln!("\nFinal Portfolio:");
    eprintln!("\nLong Positions:");
    for (ticker, position) in report.portfolio.long.iter() {
        if !position.is_flat() {
            eprintln!(
                "  {}: {:.4} shares, Cost Basis: ${:.2}",
                ticker,
                position.shares.abs(),
                position.cost_basis
            );
        }
    }
    eprintln!("\nShort Positions:");
    for (ticker, position) in report.portfolio.short.iter() {
        if !position.is_flat() {
            eprintln!(
                "  {}: {:.4} shares, Cost Basis: ${:.2}",
                ticker,
                position.shares.abs(),
                position.cost_basis
            );
        }
    }

    eprintln!("\nDaily P&L History:");
    for entry in &report.statistics {
        eprintln!("  {}: ${:.2}", entry.date, entry.today_profit);
    }

    if !report.skips.is_empty() {
        eprintln!("\nSkipped {} ticker/day fetches", report.skips.len());
    }
    eprintln!("\nCumulative P&L: ${:.2}", report.cumulative_profit());
}

fn run_queue(config_path: &PathBuf, input_override: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let input = match resolve_path(input_override, &config, "input") {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let records = match JsonSentimentAdapter::new(&input).load() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let queue = TradingQueue::build(&records);

    println!("Trading queue ({} trades):", queue.pending_trade_count());
    for date in queue.execution_dates() {
        for trade in queue.trades_for(date) {
            let direction = if trade.sentiment <= 0.0 { "short" } else { "buy" };
            println!(
                "  {date}: {direction} {} (sentiment {:.2})",
                trade.ticker, trade.sentiment
            );
        }
    }

    println!("\nValuation dates ({}):", queue.valuation_dates().len());
    for date in queue.valuation_dates() {
        println!("  {date}");
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match validate_simulation_config(&config) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
