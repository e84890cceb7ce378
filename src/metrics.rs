use tracing::debug;

use crate::error::DashboardError;
use crate::models::{DailyRecord, EnrichedRecord, MetricsSummary};

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub summary: MetricsSummary,
    pub records: Vec<EnrichedRecord>,
}

/// Summary statistics plus the normalized, calendar-enriched records.
pub fn aggregate(records: &[DailyRecord]) -> Result<Aggregation, DashboardError> {
    let summary = summarize(records)?;
    let records = normalize(records)?;
    debug!(
        records = records.len(),
        max_activeness = summary.max_activeness,
        "aggregated metrics"
    );
    Ok(Aggregation { summary, records })
}

pub fn summarize(records: &[DailyRecord]) -> Result<MetricsSummary, DashboardError> {
    let max_activeness = max_activeness(records)?;
    let total_minutes: u64 = records
        .iter()
        .map(|record| record.time_spent_minutes as u64)
        .sum();

    Ok(MetricsSummary {
        avg_activeness: mean(records, |record| record.activeness),
        avg_comprehension_pct: mean(records, |record| record.comprehension_pct),
        max_activeness,
        total_time_spent_hours: total_minutes as f64 / 60.0,
        avg_break_frequency: mean(records, |record| record.break_frequency),
        avg_hyperactivity_incidents: mean(records, |record| record.hyperactivity_incidents),
        avg_distraction_frequency: mean(records, |record| record.distraction_frequency),
        avg_task_completion_pct: mean(records, |record| record.task_completion_pct),
    })
}

/// Divides each activeness reading by the dataset maximum.
///
/// An all-zero dataset has no meaningful scale and is rejected rather than
/// mapped to zeros.
pub fn normalize(records: &[DailyRecord]) -> Result<Vec<EnrichedRecord>, DashboardError> {
    let max = max_activeness(records)?;
    if max == 0 {
        return Err(DashboardError::ZeroMaxActiveness);
    }
    Ok(records
        .iter()
        .map(|record| EnrichedRecord::new(*record, max))
        .collect())
}

pub fn max_activeness(records: &[DailyRecord]) -> Result<u32, DashboardError> {
    records
        .iter()
        .map(|record| record.activeness)
        .max()
        .ok_or(DashboardError::EmptyDataset)
}

fn mean(records: &[DailyRecord], field: impl Fn(&DailyRecord) -> u32) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: u64 = records.iter().map(|record| field(record) as u64).sum();
    total as f64 / records.len() as f64
}
