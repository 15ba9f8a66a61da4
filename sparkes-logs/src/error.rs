/// Error types for loading log exports
use thiserror::Error;

/// Main error type for log loading operations
#[derive(Error, Debug)]
pub enum LogError {
    /// Reading the export failed
    #[error("Failed to read log export: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to parse JSON data
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// Metric name not recognised
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Export is neither JSON nor CSV
    #[error("Unsupported log export format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown log kind: {0} (expected nutrition or weight)")]
    UnknownLogKind(String),
}

/// Type alias for Results using LogError
pub type Result<T> = std::result::Result<T, LogError>;
