//! Concrete port implementations.

pub mod file_config_adapter;
pub mod json_sentiment_adapter;
pub mod json_snapshot_adapter;
pub mod retrying_market_data;
pub mod yahoo_adapter;
