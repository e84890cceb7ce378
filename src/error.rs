use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("cannot aggregate an empty dataset")]
    EmptyDataset,
    /// Every record has activeness 0, so normalization would divide by zero.
    #[error("maximum activeness is 0; normalized activeness is undefined")]
    ZeroMaxActiveness,
    #[error("generated window starting {start} runs past the calendar at day {offset}")]
    DateOverflow { start: NaiveDate, offset: usize },
}
