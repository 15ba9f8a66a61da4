//! Grouping of daily logs into ISO-8601 weeks.
//!
//! Weeks start on Monday and week 1 of a year is the one holding its first
//! Thursday, so a bucket's `iso_year` can differ from the calendar year of
//! some of its days (2021-01-01 sits in week 53 of 2020).

use crate::average::{average_metrics, metrics_present, MetricAverages};
use crate::config::AbsentPolicy;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use sparkes_logs::date_range::DateRange;
use sparkes_logs::log_record::{sort_oldest_first, LogRecord};
use sparkes_logs::metric::Metric;
use sparkes_utils::dates::{
    end_of_iso_week, iso_week_key, start_of_iso_week, week_range_label, week_title,
};
use std::collections::BTreeMap;

/// Order of buckets in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeeklyOptions {
    pub order: WeekOrder,
    pub absent: AbsentPolicy,
}

/// The records of one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekBucket {
    pub iso_year: i32,
    pub iso_week: u32,
    /// Monday
    pub week_start: NaiveDate,
    /// Sunday
    pub week_end: NaiveDate,
    /// Monday to Sunday; same-day records keep their input order
    pub records: Vec<LogRecord>,
    /// Averages for every metric seen anywhere in the grouped input
    pub averages: MetricAverages,
}

impl WeekBucket {
    pub fn key(&self) -> (i32, u32) {
        (self.iso_year, self.iso_week)
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn average(&self, metric: Metric) -> Option<f64> {
        self.averages.get(&metric).copied().flatten()
    }

    /// "Week 05: 2021-02-01 → 2021-02-07"
    pub fn title(&self) -> String {
        week_title(self.iso_week, &self.week_start)
    }

    /// "01 February - 07 February"
    pub fn range_label(&self) -> String {
        week_range_label(&self.week_start)
    }

    /// Every day of the week, Monday first.
    pub fn days(&self) -> DateRange {
        DateRange(self.week_start, self.week_end)
    }
}

/// Group `records` into ISO-week buckets.
///
/// Every input record lands in exactly one bucket. Buckets are ordered by
/// `(iso_year, iso_week)` in the direction `options.order` asks for. Empty
/// input gives no buckets.
pub fn group_by_iso_week(records: &[LogRecord], options: &WeeklyOptions) -> Vec<WeekBucket> {
    let metrics = metrics_present(records);
    let mut groups: BTreeMap<(i32, u32), Vec<LogRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(iso_week_key(&record.date))
            .or_default()
            .push(record.clone());
    }

    let mut buckets: Vec<WeekBucket> = groups
        .into_iter()
        .filter_map(|((iso_year, iso_week), mut rows)| {
            sort_oldest_first(&mut rows);
            let week_start = start_of_iso_week(&rows.first()?.date);
            let averages = average_metrics(&rows, &metrics, options.absent);
            Some(WeekBucket {
                iso_year,
                iso_week,
                week_start,
                week_end: end_of_iso_week(&week_start),
                records: rows,
                averages,
            })
        })
        .collect();

    if options.order == WeekOrder::NewestFirst {
        buckets.reverse();
    }
    debug!(
        "weekly: {} records into {} buckets",
        records.len(),
        buckets.len()
    );
    buckets
}
