use crate::date_range::DateRange;
use crate::log_record::{sort_newest_first, LogRecord};
use chrono::NaiveDate;

/// Default number of rows requested from the backend (~2 years of daily logs).
pub const DEFAULT_LOG_LIMIT: usize = 730;

/// Date-bounded, size-limited view over already-fetched records.
///
/// Mirrors the options the backend query accepts: inclusive `from`/`to`
/// bounds on the log date, newest-first ordering and a row limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl Default for LogQuery {
    fn default() -> Self {
        LogQuery {
            from: None,
            to: None,
            limit: Some(DEFAULT_LOG_LIMIT),
        }
    }
}

impl LogQuery {
    /// A query with no bounds and no limit.
    pub fn all() -> Self {
        LogQuery {
            from: None,
            to: None,
            limit: None,
        }
    }

    /// Inclusive date bounds, open ends widened to the calendar limits.
    pub fn range(&self) -> DateRange {
        DateRange(
            self.from.unwrap_or(NaiveDate::MIN),
            self.to.unwrap_or(NaiveDate::MAX),
        )
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        self.range().contains(&record.date)
    }

    /// Matching records, newest first, truncated to the limit.
    /// The input slice is left untouched.
    pub fn apply(&self, records: &[LogRecord]) -> Vec<LogRecord> {
        let mut selected: Vec<LogRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        sort_newest_first(&mut selected);
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}
