use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crate::charts::{self, HeatmapChart, LineChart};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::filter::{self, DateRange};
use crate::generator;
use crate::heatmap::{self, HeatmapGrid};
use crate::metrics;
use crate::models::{DailyRecord, MetricTile, MetricsSummary};

/// Everything derived from the seed. Built once; only the range selection
/// is recomputed per request.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub config: DashboardConfig,
    pub records: Vec<DailyRecord>,
    pub summary: MetricsSummary,
    pub heatmap: HeatmapGrid,
}

#[derive(Debug, Serialize)]
pub struct DashboardPayload<'a> {
    pub seed: u64,
    pub metrics: Vec<MetricTile>,
    pub heatmap: HeatmapChart,
    pub range: DateRange,
    pub records: &'a [DailyRecord],
    pub charts: Vec<LineChart>,
}

impl Dashboard {
    pub fn build(config: DashboardConfig) -> Result<Self, DashboardError> {
        let records = generator::generate(config.seed, config.start_date)?;
        let aggregation = metrics::aggregate(&records)?;
        let heatmap = heatmap::bin_weekly(&aggregation.records);
        info!(
            seed = config.seed,
            start = %config.start_date,
            records = records.len(),
            weeks = heatmap.weeks.len(),
            "dashboard built"
        );
        Ok(Self {
            config,
            records,
            summary: aggregation.summary,
            heatmap,
        })
    }

    pub fn default_range(&self) -> Option<DateRange> {
        DateRange::default_for(&self.records)
    }

    pub fn select(&self, range: DateRange) -> Vec<DailyRecord> {
        filter::filter_range(&self.records, range)
    }

    pub fn payload<'a>(
        &self,
        range: DateRange,
        selected: &'a [DailyRecord],
    ) -> DashboardPayload<'a> {
        DashboardPayload {
            seed: self.config.seed,
            metrics: self.summary.tiles(),
            heatmap: charts::heatmap_chart(&self.heatmap),
            range,
            records: selected,
            charts: charts::line_charts(selected),
        }
    }
}

pub fn write_json(path: &Path, payload: &DashboardPayload<'_>) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, payload)
        .context("failed to encode dashboard payload")?;
    writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, records: &[DailyRecord]) -> anyhow::Result<usize> {
    #[derive(Serialize)]
    struct CsvRow {
        date: chrono::NaiveDate,
        time_spent_minutes: u32,
        active_concentration_pct: u32,
        comprehension_pct: u32,
        break_frequency: u32,
        hyperactivity_incidents: u32,
        distraction_frequency: u32,
        task_completion_pct: u32,
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(CsvRow {
            date: record.date,
            time_spent_minutes: record.time_spent_minutes,
            active_concentration_pct: record.active_concentration_pct,
            comprehension_pct: record.comprehension_pct,
            break_frequency: record.break_frequency,
            hyperactivity_incidents: record.hyperactivity_incidents,
            distraction_frequency: record.distraction_frequency,
            task_completion_pct: record.task_completion_pct,
        })?;
    }
    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dashboard() -> Dashboard {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        Dashboard::build(DashboardConfig::new(42, Some(start))).unwrap()
    }

    #[test]
    fn build_wires_every_stage() {
        let dashboard = dashboard();
        assert_eq!(dashboard.records.len(), 365);
        assert_eq!(dashboard.records[0].date.to_string(), "2023-01-01");
        assert_eq!(dashboard.heatmap.cells().map(|c| c.count).sum::<usize>(), 365);
        assert_eq!(
            dashboard.summary.max_activeness,
            dashboard.records.iter().map(|r| r.activeness).max().unwrap()
        );
    }

    #[test]
    fn default_selection_is_thirty_days() {
        let dashboard = dashboard();
        let range = dashboard.default_range().unwrap();
        let selected = dashboard.select(range);
        assert_eq!(selected.len(), 30);
        assert_eq!(selected.last().unwrap().date.to_string(), "2023-01-30");
    }

    #[test]
    fn payload_serializes_tiles_charts_and_records() {
        let dashboard = dashboard();
        let range = dashboard.default_range().unwrap();
        let selected = dashboard.select(range);
        let json = serde_json::to_value(dashboard.payload(range, &selected)).unwrap();
        assert_eq!(json["seed"], 42);
        assert_eq!(json["metrics"].as_array().unwrap().len(), 8);
        assert_eq!(json["records"].as_array().unwrap().len(), 30);
        assert_eq!(json["charts"].as_array().unwrap().len(), 4);
        assert_eq!(json["range"]["start"], "2023-01-01");
        assert_eq!(json["heatmap"]["zmax"], 1.0);
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let dashboard = dashboard();
        let selected = dashboard.select(dashboard.default_range().unwrap());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        assert_eq!(write_csv(&path, &selected).unwrap(), 30);

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,time_spent_minutes,active_concentration_pct,comprehension_pct,\
             break_frequency,hyperactivity_incidents,distraction_frequency,task_completion_pct"
        );
        assert!(lines.next().unwrap().starts_with("2023-01-01,"));
        assert_eq!(text.lines().count(), 31);
    }

    #[test]
    fn json_export_round_trips_through_disk() {
        let dashboard = dashboard();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 7).unwrap(),
        );
        let selected = dashboard.select(range);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        write_json(&path, &dashboard.payload(range, &selected)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["records"].as_array().unwrap().len(), 7);
    }
}
