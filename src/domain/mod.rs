//! Core domain types and logic.

pub mod calendar;
pub mod config_validation;
pub mod error;
pub mod ohlc;
pub mod portfolio;
pub mod position;
pub mod queue;
pub mod sentiment;
pub mod simulator;
pub mod snapshot;
