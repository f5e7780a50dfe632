//! Port traits at the system's seams.

pub mod config_port;
pub mod market_data_port;
pub mod sentiment_port;
pub mod snapshot_port;
