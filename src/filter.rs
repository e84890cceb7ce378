use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::models::DailyRecord;

/// Length of the default selection, counted from the first generated day.
pub const DEFAULT_RANGE_DAYS: usize = 30;

/// Inclusive calendar interval chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The first `DEFAULT_RANGE_DAYS` records, or all of them when fewer exist.
    pub fn default_for(records: &[DailyRecord]) -> Option<Self> {
        let first = records.first()?;
        let last = records
            .get(DEFAULT_RANGE_DAYS - 1)
            .or_else(|| records.last())?;
        Some(Self::new(first.date, last.date))
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Records dated inside `range`, in their original order. An inverted range
/// selects nothing.
pub fn filter_range(records: &[DailyRecord], range: DateRange) -> Vec<DailyRecord> {
    if range.is_inverted() {
        debug!(start = %range.start, end = %range.end, "inverted range selects no records");
        return Vec::new();
    }
    let selected: Vec<DailyRecord> = records
        .iter()
        .filter(|record| range.contains(record.date))
        .copied()
        .collect();
    debug!(
        start = %range.start,
        end = %range.end,
        selected = selected.len(),
        "filtered records"
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn year() -> Vec<DailyRecord> {
        generator::generate(generator::DEFAULT_SEED, date(2023, 1, 1)).unwrap()
    }

    #[test]
    fn full_window_returns_everything_in_order() {
        let records = year();
        let range = DateRange::new(records[0].date, records[364].date);
        assert_eq!(filter_range(&records, range), records);
    }

    #[test]
    fn inverted_range_is_empty() {
        let records = year();
        let range = DateRange::new(date(2023, 5, 1), date(2023, 4, 1));
        assert!(range.is_inverted());
        assert!(filter_range(&records, range).is_empty());
    }

    #[test]
    fn single_day_range_returns_that_day() {
        let records = year();
        let day = date(2023, 7, 14);
        let selected = filter_range(&records, DateRange::new(day, day));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, day);
    }

    #[test]
    fn first_thirty_days_of_january() {
        let records = year();
        let selected = filter_range(&records, DateRange::new(date(2023, 1, 1), date(2023, 1, 30)));
        assert_eq!(selected.len(), 30);
        assert_eq!(selected[0].date, date(2023, 1, 1));
        assert_eq!(selected[29].date, date(2023, 1, 30));
        assert_eq!(selected, records[..30].to_vec());
    }

    #[test]
    fn bounds_outside_the_data_compare_by_date() {
        let records = year();
        let range = DateRange::new(date(2022, 6, 1), date(2023, 1, 3));
        assert_eq!(filter_range(&records, range).len(), 3);
        let range = DateRange::new(date(2024, 1, 1), date(2024, 2, 1));
        assert!(filter_range(&records, range).is_empty());
    }

    #[test]
    fn default_range_covers_first_thirty_days() {
        let records = year();
        let range = DateRange::default_for(&records).unwrap();
        assert_eq!(range, DateRange::new(date(2023, 1, 1), date(2023, 1, 30)));
        assert_eq!(DateRange::default_for(&records[..5]).unwrap().end, date(2023, 1, 5));
        assert_eq!(DateRange::default_for(&[]), None);
    }
}
