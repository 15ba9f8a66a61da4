use crate::metric::Metric;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One day of logged values for a user.
///
/// A metric missing from `values` was not recorded that day. Absent is not
/// the same as zero; callers pick how to treat it when aggregating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Backend-assigned identifier, or the log date when the row had none
    pub id: String,
    pub date: NaiveDate,
    pub values: BTreeMap<Metric, f64>,
}

impl LogRecord {
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        LogRecord {
            id: id.into(),
            date,
            values: BTreeMap::new(),
        }
    }

    /// Set a metric value. `None` and non-finite numbers leave it absent.
    pub fn with_value(mut self, metric: Metric, value: Option<f64>) -> Self {
        self.set_value(metric, value);
        self
    }

    pub fn set_value(&mut self, metric: Metric, value: Option<f64>) {
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                self.values.insert(metric, v);
            }
            None => {
                self.values.remove(&metric);
            }
        }
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    /// Metrics with a recorded value, in `Metric` order.
    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.values.keys().copied()
    }
}

/// Sort records newest first (the order the backend returns them in).
/// Records sharing a date keep their relative order.
pub fn sort_newest_first(records: &mut [LogRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Sort records oldest first. Records sharing a date keep their relative order.
pub fn sort_oldest_first(records: &mut [LogRecord]) {
    records.sort_by(|a, b| a.date.cmp(&b.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_absent_values_stay_absent() {
        let record = LogRecord::new("1", day(1))
            .with_value(Metric::Calories, Some(2000.0))
            .with_value(Metric::Protein, None)
            .with_value(Metric::Fat, Some(f64::NAN));
        assert_eq!(record.value(Metric::Calories), Some(2000.0));
        assert_eq!(record.value(Metric::Protein), None);
        assert_eq!(record.value(Metric::Fat), None);
        assert_eq!(record.metrics().collect::<Vec<_>>(), vec![Metric::Calories]);
    }

    #[test]
    fn test_set_value_none_clears() {
        let mut record = LogRecord::new("1", day(1)).with_value(Metric::Weight, Some(80.5));
        record.set_value(Metric::Weight, None);
        assert_eq!(record.value(Metric::Weight), None);
    }

    #[test]
    fn test_sorting_is_stable_for_duplicate_dates() {
        let mut records = vec![
            LogRecord::new("a", day(2)),
            LogRecord::new("b", day(5)),
            LogRecord::new("c", day(2)),
            LogRecord::new("d", day(1)),
        ];
        sort_oldest_first(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "a", "c", "b"]);

        sort_newest_first(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
    }
}
