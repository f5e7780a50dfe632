//! Snapshot persistence port trait.

use crate::domain::error::SentfolioError;
use crate::domain::snapshot::{DailySnapshot, PortfolioHistory};

/// Port for persisting simulation output. Write failures abort the run.
pub trait SnapshotPort {
    /// Persist one valuation day's full record.
    fn write_daily(&self, snapshot: &DailySnapshot) -> Result<(), SentfolioError>;

    /// Persist the consolidated end-of-run history.
    fn write_history(&self, history: &PortfolioHistory) -> Result<(), SentfolioError>;
}
