/// Error types for chart and aggregation configuration
use thiserror::Error;

/// Raised when a configuration would produce a meaningless chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Percentile cut points out of range or not strictly ordered
    #[error("Invalid percentile range: lower {lower} must be below upper {upper}, both within 0..=100")]
    InvalidPercentiles { lower: f64, upper: f64 },

    /// Rounding unit must be a positive finite number
    #[error("Invalid rounding unit: {0}")]
    InvalidRoundingUnit(f64),

    /// Plot area has no room left once padding is removed
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),
}
