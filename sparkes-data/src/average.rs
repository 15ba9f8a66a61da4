//! Per-metric averages over groups of log records.

use crate::config::AbsentPolicy;
use serde::Serialize;
use sparkes_logs::log_record::{sort_newest_first, LogRecord};
use sparkes_logs::metric::Metric;
use std::collections::{BTreeMap, BTreeSet};

/// Days covered by the headline average card.
pub const ROLLING_WINDOW_DAYS: usize = 7;

/// Average per metric; `None` when nothing could be averaged.
pub type MetricAverages = BTreeMap<Metric, Option<f64>>;

/// Mean of one metric over `records`.
///
/// With [`AbsentPolicy::AsZero`] the sum of recorded values is divided by the
/// number of records; with [`AbsentPolicy::Ignore`] by the number of records
/// that have the metric. Returns `None` when the divisor is zero.
pub fn average_metric(records: &[LogRecord], metric: Metric, absent: AbsentPolicy) -> Option<f64> {
    let present: Vec<f64> = records.iter().filter_map(|r| r.value(metric)).collect();
    let divisor = match absent {
        AbsentPolicy::AsZero => records.len(),
        AbsentPolicy::Ignore => present.len(),
    };
    if divisor == 0 {
        return None;
    }
    Some(present.iter().sum::<f64>() / divisor as f64)
}

/// Averages for each of `metrics` over `records`.
pub fn average_metrics<'a>(
    records: &[LogRecord],
    metrics: impl IntoIterator<Item = &'a Metric>,
    absent: AbsentPolicy,
) -> MetricAverages {
    metrics
        .into_iter()
        .map(|metric| (*metric, average_metric(records, *metric, absent)))
        .collect()
}

/// Every metric recorded on at least one record.
pub fn metrics_present(records: &[LogRecord]) -> BTreeSet<Metric> {
    records.iter().flat_map(|r| r.metrics()).collect()
}

/// Averages over the newest `window` records, whatever order they come in.
/// Returns `None` for an empty input or a zero window.
pub fn rolling_average(
    records: &[LogRecord],
    window: usize,
    absent: AbsentPolicy,
) -> Option<MetricAverages> {
    if records.is_empty() || window == 0 {
        return None;
    }
    let mut newest = records.to_vec();
    sort_newest_first(&mut newest);
    newest.truncate(window);
    let metrics = metrics_present(records);
    Some(average_metrics(&newest, &metrics, absent))
}

/// Display values for a nutrition average: whole kcal, macros to one
/// decimal place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NutritionSummary {
    pub calories: i64,
    pub carbs: String,
    pub fat: String,
    pub protein: String,
    /// Number of records averaged
    pub count: usize,
}

impl NutritionSummary {
    pub fn from_averages(averages: &MetricAverages, count: usize) -> Self {
        let get = |metric| averages.get(&metric).copied().flatten().unwrap_or(0.0);
        NutritionSummary {
            calories: get(Metric::Calories).round() as i64,
            carbs: format!("{:.1}", get(Metric::Carbohydrate)),
            fat: format!("{:.1}", get(Metric::Fat)),
            protein: format!("{:.1}", get(Metric::Protein)),
            count,
        }
    }

    /// Summary of the newest [`ROLLING_WINDOW_DAYS`] records.
    pub fn rolling(records: &[LogRecord], absent: AbsentPolicy) -> Option<Self> {
        let averages = rolling_average(records, ROLLING_WINDOW_DAYS, absent)?;
        let count = records.len().min(ROLLING_WINDOW_DAYS);
        Some(NutritionSummary::from_averages(&averages, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sparkes_logs::date_range::DateRange;

    fn nutrition_days(calories: &[Option<f64>]) -> Vec<LogRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        DateRange(start, NaiveDate::MAX)
            .zip(calories.iter())
            .enumerate()
            .map(|(i, (date, kcal))| {
                LogRecord::new(i.to_string(), date)
                    .with_value(Metric::Calories, *kcal)
                    .with_value(Metric::Protein, Some(150.0))
            })
            .collect()
    }

    #[test]
    fn test_average_metric_policies() {
        let records = nutrition_days(&[Some(2000.0), None, Some(2200.0), None]);
        assert_eq!(
            average_metric(&records, Metric::Calories, AbsentPolicy::AsZero),
            Some(1050.0)
        );
        assert_eq!(
            average_metric(&records, Metric::Calories, AbsentPolicy::Ignore),
            Some(2100.0)
        );
        assert_eq!(
            average_metric(&records, Metric::Fat, AbsentPolicy::Ignore),
            None
        );
        assert_eq!(
            average_metric(&records, Metric::Fat, AbsentPolicy::AsZero),
            Some(0.0)
        );
        assert_eq!(average_metric(&[], Metric::Fat, AbsentPolicy::AsZero), None);
    }

    #[test]
    fn test_rolling_average_uses_newest_records() {
        let mut calories = vec![Some(1000.0); 5];
        calories.extend(vec![Some(2000.0); 7]);
        let mut records = nutrition_days(&calories);
        // newest first, as fetched
        records.reverse();
        let averages = rolling_average(&records, 7, AbsentPolicy::AsZero).unwrap();
        assert_eq!(averages[&Metric::Calories], Some(2000.0));
        assert_eq!(averages[&Metric::Protein], Some(150.0));

        // order of the input does not matter
        records.reverse();
        let again = rolling_average(&records, 7, AbsentPolicy::AsZero).unwrap();
        assert_eq!(again, averages);
    }

    #[test]
    fn test_rolling_average_short_and_empty() {
        let records = nutrition_days(&[Some(1800.0), Some(2000.0)]);
        let averages = rolling_average(&records, 7, AbsentPolicy::AsZero).unwrap();
        assert_eq!(averages[&Metric::Calories], Some(1900.0));
        assert!(rolling_average(&[], 7, AbsentPolicy::AsZero).is_none());
        assert!(rolling_average(&records, 0, AbsentPolicy::AsZero).is_none());
    }

    #[test]
    fn test_nutrition_summary_formatting() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let records = vec![
            LogRecord::new("1", start)
                .with_value(Metric::Calories, Some(2001.0))
                .with_value(Metric::Carbohydrate, Some(200.0))
                .with_value(Metric::Fat, Some(70.25))
                .with_value(Metric::Protein, Some(150.0)),
            LogRecord::new("2", start.succ_opt().unwrap())
                .with_value(Metric::Calories, Some(2002.0))
                .with_value(Metric::Carbohydrate, Some(210.0))
                .with_value(Metric::Fat, Some(70.0))
                .with_value(Metric::Protein, None),
        ];
        let summary = NutritionSummary::rolling(&records, AbsentPolicy::AsZero).unwrap();
        assert_eq!(summary.calories, 2002);
        assert_eq!(summary.carbs, "205.0");
        assert_eq!(summary.fat, "70.1");
        assert_eq!(summary.protein, "75.0");
        assert_eq!(summary.count, 2);
        assert!(NutritionSummary::rolling(&[], AbsentPolicy::AsZero).is_none());
    }
}
