//! Domain error types.

/// Top-level error type for sentfolio.
#[derive(Debug, thiserror::Error)]
pub enum SentfolioError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to read sentiment data from {file}: {reason}")]
    SentimentParse { file: String, reason: String },

    #[error("invalid date {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("failed to serialize snapshot for {context}: {reason}")]
    Serialize { context: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SentfolioError> for std::process::ExitCode {
    fn from(err: &SentfolioError) -> Self {
        let code: u8 = match err {
            SentfolioError::Io(_) | SentfolioError::Serialize { .. } => 1,
            SentfolioError::ConfigParse { .. }
            | SentfolioError::ConfigMissing { .. }
            | SentfolioError::ConfigInvalid { .. } => 2,
            SentfolioError::SentimentParse { .. } | SentfolioError::InvalidDate { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        let err = SentfolioError::ConfigMissing {
            section: "simulation".into(),
            key: "input".into(),
        };
        assert_eq!(err.to_string(), "missing config key [simulation] input");

        let err = SentfolioError::InvalidDate {
            value: "2025-13-40".into(),
        };
        assert!(err.to_string().contains("2025-13-40"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SentfolioError = io.into();
        assert!(matches!(err, SentfolioError::Io(_)));
    }
}
