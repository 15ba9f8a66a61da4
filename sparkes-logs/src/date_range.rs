use chrono::{NaiveDate, TimeDelta};

/// A date range iterator that yields each date from the start date
/// through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.0 <= *date && *date <= self.1
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > self.1 {
            return None;
        }
        let current = self.0;
        match current.checked_add_signed(TimeDelta::days(1)) {
            Some(next) => self.0 = next,
            // past the last representable day
            None => self.1 = NaiveDate::MIN,
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::DateRange;
    use chrono::NaiveDate;

    #[test]
    fn test_date_range_iteration() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 26).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let range = DateRange(start, end);
        let dates: Vec<NaiveDate> = range.collect();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], start);
        // leap day included
        assert_eq!(dates[3], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(dates[6], end);
    }

    #[test]
    fn test_date_range_single_day() {
        let start = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();
        let range = DateRange(start, start);
        assert!(range.contains(&start));
        let dates: Vec<NaiveDate> = range.collect();
        assert_eq!(dates, vec![start]);
    }

    #[test]
    fn test_date_range_empty() {
        let start = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
        let range = DateRange(start, end);
        assert!(!range.contains(&start));
        assert_eq!(range.count(), 0);
    }

    #[test]
    fn test_date_range_ends_at_max() {
        let start = NaiveDate::MAX.pred_opt().unwrap();
        let dates: Vec<NaiveDate> = DateRange(start, NaiveDate::MAX).collect();
        assert_eq!(dates, vec![start, NaiveDate::MAX]);
    }
}
