//! Sentiment input port trait.

use crate::domain::error::SentfolioError;
use crate::domain::sentiment::SentimentRecord;

/// Port for loading the aggregated sentiment records produced upstream.
/// Implementations return records sorted ascending by day.
pub trait SentimentPort {
    fn load(&self) -> Result<Vec<SentimentRecord>, SentfolioError>;
}
