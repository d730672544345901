use thiserror::Error;

/// Main error type for ranksweep
#[derive(Error, Debug)]
pub enum SweepError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report parsing errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// External command invocation errors
    #[error("Command error: {0}")]
    Command(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query id absent from the parsed report
    #[error("No results for query '{query}'")]
    MissingQuery { query: String },

    /// Metric absent for a query in the parsed report
    #[error("Metric '{metric}' not found for query '{query}'")]
    MissingMetric { query: String, metric: String },
}

/// Convenient Result type using SweepError
pub type Result<T> = std::result::Result<T, SweepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SweepError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let sweep_err: SweepError = io_err.into();
        assert!(matches!(sweep_err, SweepError::Io(_)));
    }

    #[test]
    fn test_missing_metric_display() {
        let err = SweepError::MissingMetric {
            query: "12".to_string(),
            metric: "map".to_string(),
        };
        assert!(err.to_string().contains("'map'"));
        assert!(err.to_string().contains("'12'"));
    }
}
