//! JSON file sentiment input adapter.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::SentfolioError;
use crate::domain::sentiment::{self, SentimentRecord};
use crate::ports::sentiment_port::SentimentPort;

/// Loads the upstream aggregation's JSON array and returns it sorted
/// ascending by day.
pub struct JsonSentimentAdapter {
    path: PathBuf,
}

impl JsonSentimentAdapter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SentimentPort for JsonSentimentAdapter {
    fn load(&self) -> Result<Vec<SentimentRecord>, SentfolioError> {
        let content = fs::read_to_string(&self.path)?;
        let mut records: Vec<SentimentRecord> =
            serde_json::from_str(&content).map_err(|e| SentfolioError::SentimentParse {
                file: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        sentiment::sort_by_day(&mut records);
        Ok(records)
    }
}
