//! Configuration validation.
//!
//! Validates all config fields before a simulation runs.

use chrono::NaiveDate;

use crate::domain::error::SentfolioError;
use crate::ports::config_port::ConfigPort;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), SentfolioError> {
    validate_input(config)?;
    validate_output_dir(config)?;
    validate_as_of(config)?;
    validate_fetch(config)?;
    Ok(())
}

fn validate_input(config: &dyn ConfigPort) -> Result<(), SentfolioError> {
    match config.get_string("simulation", "input") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(SentfolioError::ConfigMissing {
            section: "simulation".to_string(),
            key: "input".to_string(),
        }),
    }
}

fn validate_output_dir(config: &dyn ConfigPort) -> Result<(), SentfolioError> {
    match config.get_string("simulation", "output_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(SentfolioError::ConfigMissing {
            section: "simulation".to_string(),
            key: "output_dir".to_string(),
        }),
    }
}

fn validate_as_of(config: &dyn ConfigPort) -> Result<(), SentfolioError> {
    match config.get_string("simulation", "as_of") {
        None => Ok(()),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map(|_| ()).map_err(|_| {
            SentfolioError::ConfigInvalid {
                section: "simulation".to_string(),
                key: "as_of".to_string(),
                reason: "invalid as_of format, expected YYYY-MM-DD".to_string(),
            }
        }),
    }
}

fn validate_fetch(config: &dyn ConfigPort) -> Result<(), SentfolioError> {
    let max_attempts = config.get_int("fetch", "max_attempts", 5);
    if max_attempts < 1 {
        return Err(SentfolioError::ConfigInvalid {
            section: "fetch".to_string(),
            key: "max_attempts".to_string(),
            reason: "max_attempts must be at least 1".to_string(),
        });
    }
    let base_delay = config.get_double("fetch", "base_delay_secs", 60.0);
    if base_delay < 0.0 {
        return Err(SentfolioError::ConfigInvalid {
            section: "fetch".to_string(),
            key: "base_delay_secs".to_string(),
            reason: "base_delay_secs must be non-negative".to_string(),
        });
    }
    let timeout = config.get_int("fetch", "timeout_secs", 30);
    if timeout < 1 {
        return Err(SentfolioError::ConfigInvalid {
            section: "fetch".to_string(),
            key: "timeout_secs".to_string(),
            reason: "timeout_secs must be positive".to_string(),
        });
    }
    Ok(())
}
