//! CLI orchestration tests: config parsing, override resolution, and the
//! file-to-file pipeline over mock market data.

mod common;

use common::*;
use sentfolio::adapters::file_config_adapter::FileConfigAdapter;
use sentfolio::adapters::json_sentiment_adapter::JsonSentimentAdapter;
use sentfolio::adapters::json_snapshot_adapter::JsonSnapshotAdapter;
use sentfolio::cli::{build_retry_policy, resolve_as_of};
use sentfolio::domain::config_validation::validate_simulation_config;
use sentfolio::domain::error::SentfolioError;
use sentfolio::domain::queue::TradingQueue;
use sentfolio::domain::simulator::run_simulation;
use sentfolio::domain::snapshot::{DailySnapshot, PortfolioHistory};
use sentfolio::ports::sentiment_port::SentimentPort;
use sentfolio::ports::snapshot_port::SnapshotPort;
use std::io::Write;
use std::time::Duration;

const VALID_INI: &str = r#"
[simulation]
input = agg_sentiment.json
output_dir = portfolio_data
as_of = 2025-04-01

[fetch]
max_attempts = 3
base_delay_secs = 1.5
timeout_secs = 10
"#;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

mod config_loading {
    use super::*;

    #[test]
    fn valid_ini_from_disk_passes_validation() {
        let file = write_temp_ini(VALID_INI);
        let config = FileConfigAdapter::from_file(file.path()).unwrap();
        assert!(validate_simulation_config(&config).is_ok());
    }

    #[test]
    fn retry_policy_reads_fetch_section() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let policy = build_retry_policy(&config);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(1500));
    }

    #[test]
    fn retry_policy_defaults_without_fetch_section() {
        let config = FileConfigAdapter::from_string("[simulation]\ninput = a\n").unwrap();
        let policy = build_retry_policy(&config);
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_secs(60));
    }

    #[test]
    fn as_of_flag_overrides_config() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let resolved = resolve_as_of(Some(date(2025, 3, 15)), &config).unwrap();
        assert_eq!(resolved, date(2025, 3, 15));
    }

    #[test]
    fn as_of_falls_back_to_config() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let resolved = resolve_as_of(None, &config).unwrap();
        assert_eq!(resolved, date(2025, 4, 1));
    }

    #[test]
    fn bad_config_as_of_is_invalid_date() {
        let config =
            FileConfigAdapter::from_string("[simulation]\nas_of = soon\n").unwrap();
        let err = resolve_as_of(None, &config).unwrap_err();
        assert!(matches!(err, SentfolioError::InvalidDate { .. }));
    }

    #[test]
    fn as_of_without_config_is_today() {
        let config = FileConfigAdapter::from_string("[simulation]\n").unwrap();
        let resolved = resolve_as_of(None, &config).unwrap();
        assert_eq!(resolved, chrono::Local::now().date_naive());
    }
}

mod file_pipeline {
    use super::*;

    fn write_sentiment_file(dir: &std::path::Path) -> std::path::PathBuf {
        let path = dir.join("agg_sentiment.json");
        std::fs::write(
            &path,
            r#"[
                {"ticker": "ABC", "refined_sentiment": -4.0, "day": "2025-03-08"},
                {"ticker": "XYZ", "refined_sentiment": 10.0, "day": "2025-03-07"}
            ]"#,
        )
        .unwrap();
        path
    }

    fn sample_market() -> MockMarketData {
        MockMarketData::new()
            .with_prices("XYZ", date(2025, 3, 10), 50.0, 55.0)
            .with_prices("ABC", date(2025, 3, 10), 40.0, 38.0)
    }

    #[test]
    fn sentiment_file_to_snapshot_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = write_sentiment_file(dir.path());
        let output = dir.path().join("portfolio_data");

        let records = JsonSentimentAdapter::new(&input).load().unwrap();
        let queue = TradingQueue::build(&records);
        let writer = JsonSnapshotAdapter::new(&output).unwrap();

        let report =
            run_simulation(&queue, &sample_market(), &writer, date(2025, 4, 1)).unwrap();

        let history = PortfolioHistory {
            daily_data: report.snapshots.clone(),
            portfolio_statistics: report.statistics.clone(),
            initial_investment_date: report.portfolio.initial_investment_date,
            total_investment: report.portfolio.total_investment,
        };
        writer.write_history(&history).unwrap();

        // One file per valuation day (Fri 03-07 and Mon 03-10) plus history.
        assert!(output.join("portfolio_2025-03-07.json").exists());
        assert!(output.join("portfolio_2025-03-10.json").exists());
        assert!(output.join("portfolio_total_investment.json").exists());

        let monday: DailySnapshot = serde_json::from_str(
            &std::fs::read_to_string(output.join("portfolio_2025-03-10.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(monday.trades.len(), 2);
        assert!((monday.total_investment - 14.0).abs() < 1e-9);

        let restored: PortfolioHistory = serde_json::from_str(
            &std::fs::read_to_string(output.join("portfolio_total_investment.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(restored, history);
        assert_eq!(restored.initial_investment_date, Some(date(2025, 3, 10)));
    }

    #[test]
    fn two_runs_write_identical_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = write_sentiment_file(dir.path());
        let records = JsonSentimentAdapter::new(&input).load().unwrap();
        let queue = TradingQueue::build(&records);

        let out_a = dir.path().join("a");
        let writer_a = JsonSnapshotAdapter::new(&out_a).unwrap();
        run_simulation(&queue, &sample_market(), &writer_a, date(2025, 4, 1)).unwrap();

        let out_b = dir.path().join("b");
        let writer_b = JsonSnapshotAdapter::new(&out_b).unwrap();
        run_simulation(&queue, &sample_market(), &writer_b, date(2025, 4, 1)).unwrap();

        for name in ["portfolio_2025-03-07.json", "portfolio_2025-03-10.json"] {
            let a = std::fs::read_to_string(out_a.join(name)).unwrap();
            let b = std::fs::read_to_string(out_b.join(name)).unwrap();
            assert_eq!(a, b, "{name} differs between runs");
        }
    }
}
