//! Chart window presets and record → sample conversion.

use crate::config::{Scale, TrendConfig};
use crate::trend::TrendPoint;
use serde::{Deserialize, Serialize};
use sparkes_logs::log_record::{sort_newest_first, LogRecord};
use sparkes_logs::metric::Metric;

/// How many of the latest days a chart covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartWindow {
    #[default]
    Week,
    Month,
    Quarter,
}

impl ChartWindow {
    pub const ALL: [ChartWindow; 3] = [ChartWindow::Week, ChartWindow::Month, ChartWindow::Quarter];

    pub fn days(&self) -> usize {
        match self {
            ChartWindow::Week => 7,
            ChartWindow::Month => 30,
            ChartWindow::Quarter => 90,
        }
    }

    pub fn from_days(days: usize) -> Option<Self> {
        ChartWindow::ALL.into_iter().find(|w| w.days() == days)
    }

    /// Apply this window's scale, percentiles, smoothing and tick count on
    /// top of `base`. Short windows clip outliers harder and smooth more;
    /// the 90 day view shows the true range.
    pub fn apply(&self, base: TrendConfig) -> TrendConfig {
        let (scale, lower_pct, upper_pct, smooth_radius, tick_count) = match self {
            ChartWindow::Week => (Scale::Percentile, 15.0, 85.0, 3, 4),
            ChartWindow::Month => (Scale::Percentile, 10.0, 90.0, 2, 4),
            ChartWindow::Quarter => (Scale::MinMax, base.lower_pct, base.upper_pct, 1, 5),
        };
        TrendConfig {
            scale,
            lower_pct,
            upper_pct,
            smooth_radius,
            tick_count,
            ..base
        }
    }
}

/// Base configuration for a metric: calories snap to 100 kcal, macros to
/// 10 g and body weight to 1 kg.
pub fn metric_config(metric: Metric) -> TrendConfig {
    let rounding_unit = match metric {
        Metric::Calories => 100.0,
        Metric::Protein | Metric::Carbohydrate | Metric::Fat => 10.0,
        Metric::Weight => 1.0,
    };
    TrendConfig {
        rounding_unit,
        ..TrendConfig::default()
    }
}

/// One sample per record for `metric`, absent values kept as `None`.
pub fn trend_points(records: &[LogRecord], metric: Metric) -> Vec<TrendPoint> {
    records
        .iter()
        .map(|r| TrendPoint::new(r.date, r.value(metric)))
        .collect()
}

/// Samples for the newest `window.days()` records, oldest first.
pub fn window_points(
    records: &[LogRecord],
    metric: Metric,
    window: ChartWindow,
) -> Vec<TrendPoint> {
    let mut newest = records.to_vec();
    sort_newest_first(&mut newest);
    newest.truncate(window.days());
    newest.reverse();
    trend_points(&newest, metric)
}
