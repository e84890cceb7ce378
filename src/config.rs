use chrono::{Duration, NaiveDate, Utc};

use crate::filter::DateRange;
use crate::generator::WINDOW_DAYS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    pub seed: u64,
    pub start_date: NaiveDate,
}

impl DashboardConfig {
    pub fn new(seed: u64, start_date: Option<NaiveDate>) -> Self {
        Self {
            seed,
            start_date: start_date.unwrap_or_else(default_start_date),
        }
    }
}

/// The window ends yesterday: it starts `WINDOW_DAYS` before today.
pub fn default_start_date() -> NaiveDate {
    Utc::now().date_naive() - Duration::days(WINDOW_DAYS as i64)
}

/// Fills whichever bound the user left out from `fallback`.
pub fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    fallback: DateRange,
) -> DateRange {
    DateRange::new(from.unwrap_or(fallback.start), to.unwrap_or(fallback.end))
}
