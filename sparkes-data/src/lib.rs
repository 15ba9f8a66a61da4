//! Chart and table data for Sparkes nutrition and weight logs.
//!
//! Two independent pieces sit on top of the same fetched log records:
//!
//! - [`trend`]: dated samples → smoothed, domain-scaled, tick-labelled chart
//!   geometry ([`trend::ChartSeries`]).
//! - [`weekly`]: records → ISO-week buckets with per-metric averages
//!   ([`weekly::WeekBucket`]).
//!
//! Both are pure functions of their inputs; nothing here performs I/O.

pub mod average;
pub mod cache;
pub mod config;
pub mod error;
pub mod path;
pub mod trend;
pub mod weekly;
pub mod window;

pub use config::{AbsentPolicy, Curve, Scale, TrendConfig, TrendConfigBuilder, Viewport, XScale};
pub use error::ConfigError;
pub use trend::{transform, transform_checked, ChartSeries, TrendPoint};
pub use weekly::{group_by_iso_week, WeekBucket, WeekOrder, WeeklyOptions};
