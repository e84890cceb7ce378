use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One synthetic day of behavioural readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub activeness: u32,
    pub time_spent_minutes: u32,
    pub active_concentration_pct: u32,
    pub comprehension_pct: u32,
    pub break_frequency: u32,
    pub hyperactivity_incidents: u32,
    pub distraction_frequency: u32,
    pub task_completion_pct: u32,
}

/// A record plus the columns derived once after generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: DailyRecord,
    pub normalized_activeness: f64,
    pub iso_year: i32,
    pub iso_week: u32,
    /// Monday = 0 .. Sunday = 6.
    pub weekday: u32,
}

impl EnrichedRecord {
    pub fn new(record: DailyRecord, max_activeness: u32) -> Self {
        let iso = record.date.iso_week();
        Self {
            record,
            normalized_activeness: record.activeness as f64 / max_activeness as f64,
            iso_year: iso.year(),
            iso_week: iso.week(),
            weekday: record.date.weekday().num_days_from_monday(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub avg_activeness: f64,
    pub avg_comprehension_pct: f64,
    pub max_activeness: u32,
    pub total_time_spent_hours: f64,
    pub avg_break_frequency: f64,
    pub avg_hyperactivity_incidents: f64,
    pub avg_distraction_frequency: f64,
    pub avg_task_completion_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

impl MetricsSummary {
    /// The eight headline tiles, in dashboard order.
    pub fn tiles(&self) -> Vec<MetricTile> {
        let tile = |label, value| MetricTile { label, value };
        vec![
            tile("Avg Activeness (%)", format!("{:.2}", self.avg_activeness)),
            tile(
                "Avg Comprehension (%)",
                format!("{:.2}", self.avg_comprehension_pct),
            ),
            tile("Max Activeness (%)", format!("{}%", self.max_activeness)),
            tile(
                "Total Time Spent (hrs)",
                format!("{:.2}", self.total_time_spent_hours),
            ),
            tile(
                "Avg Break Frequency",
                format!("{:.2}", self.avg_break_frequency),
            ),
            tile(
                "Avg Hyperactivity Incidents",
                format!("{:.2}", self.avg_hyperactivity_incidents),
            ),
            tile(
                "Avg Distraction Frequency",
                format!("{:.2}", self.avg_distraction_frequency),
            ),
            tile(
                "Avg Task Completion (%)",
                format!("{:.2}", self.avg_task_completion_pct),
            ),
        ]
    }
}
