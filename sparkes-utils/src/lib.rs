//! Shared utility functions for Sparkes crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, NaiveDate, TimeDelta};

    /// Date format used by the backend for `log_date` columns: "YYYY-MM-DD"
    pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(LOG_DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format.
    ///
    /// Timestamps such as "2024-01-15T00:00:00Z" are accepted by reading only
    /// the leading date part, since logs carry no time-of-day semantics.
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let trimmed = s.trim();
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        Ok(NaiveDate::parse_from_str(date_part, LOG_DATE_FORMAT)?)
    }

    /// ISO-8601 week identity of a date as `(iso_year, iso_week)`.
    ///
    /// Week 1 is the week holding the year's first Thursday, so early January
    /// days can belong to the previous ISO year and late December days to the
    /// next one.
    pub fn iso_week_key(date: &NaiveDate) -> (i32, u32) {
        let week = date.iso_week();
        (week.year(), week.week())
    }

    /// Monday of the ISO week containing `date`, or `NaiveDate::MIN` when
    /// that Monday is not representable.
    pub fn start_of_iso_week(date: &NaiveDate) -> NaiveDate {
        let offset = date.weekday().num_days_from_monday() as i64;
        date.checked_sub_signed(TimeDelta::days(offset)).unwrap_or(NaiveDate::MIN)
    }

    /// Sunday of the ISO week containing `date`, clamped to `NaiveDate::MAX`.
    pub fn end_of_iso_week(date: &NaiveDate) -> NaiveDate {
        let offset = 6 - date.weekday().num_days_from_monday() as i64;
        date.checked_add_signed(TimeDelta::days(offset)).unwrap_or(NaiveDate::MAX)
    }

    /// Section title for a week, e.g. "Week 05: 2021-02-01 → 2021-02-07".
    pub fn week_title(iso_week: u32, week_start: &NaiveDate) -> String {
        let week_end = end_of_iso_week(week_start);
        format!(
            "Week {:02}: {} → {}",
            iso_week,
            format_date(week_start),
            format_date(&week_end)
        )
    }

    /// Long-form range of a week, e.g. "01 February - 07 February".
    pub fn week_range_label(week_start: &NaiveDate) -> String {
        let week_end = end_of_iso_week(week_start);
        format!(
            "{} - {}",
            week_start.format("%d %B"),
            week_end.format("%d %B")
        )
    }

    /// Short weekday name used for table rows ("Mon", "Tue", ...).
    pub fn weekday_short(date: &NaiveDate) -> String {
        date.format("%a").to_string()
    }

}
