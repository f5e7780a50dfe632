//! JSON snapshot writer adapter.
//!
//! One pretty-printed file per valuation day plus a consolidated history
//! file, matching the layout the portfolio front end consumes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::SentfolioError;
use crate::domain::snapshot::{DailySnapshot, PortfolioHistory};
use crate::ports::snapshot_port::SnapshotPort;

const HISTORY_FILE: &str = "portfolio_total_investment.json";

pub struct JsonSnapshotAdapter {
    output_dir: PathBuf,
}

impl JsonSnapshotAdapter {
    /// Create the adapter, ensuring the output directory exists.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, SentfolioError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn daily_path(&self, snapshot: &DailySnapshot) -> PathBuf {
        self.output_dir
            .join(format!("portfolio_{}.json", snapshot.date))
    }

    pub fn history_path(&self) -> PathBuf {
        self.output_dir.join(HISTORY_FILE)
    }
}

impl SnapshotPort for JsonSnapshotAdapter {
    fn write_daily(&self, snapshot: &DailySnapshot) -> Result<(), SentfolioError> {
        let json =
            serde_json::to_string_pretty(snapshot).map_err(|e| SentfolioError::Serialize {
                context: format!("day {}", snapshot.date),
                reason: e.to_string(),
            })?;
        fs::write(self.daily_path(snapshot), json)?;
        Ok(())
    }

    fn write_history(&self, history: &PortfolioHistory) -> Result<(), SentfolioError> {
        let json =
            serde_json::to_string_pretty(history).map_err(|e| SentfolioError::Serialize {
                context: "history".to_string(),
                reason: e.to_string(),
            })?;
        fs::write(self.history_path(), json)?;
        Ok(())
    }
}
