use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::EnrichedRecord;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const Z_MIN: f64 = 0.0;
pub const Z_MAX: f64 = 1.0;

/// Average normalized activeness for one (weekday, ISO week) key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub weekday: u32,
    pub iso_week: u32,
    pub mean: f64,
    pub count: usize,
    /// ISO years whose records landed in this cell.
    pub iso_years: BTreeSet<i32>,
}

impl HeatmapCell {
    /// True when records from different ISO years share this week number.
    pub fn is_blended(&self) -> bool {
        self.iso_years.len() > 1
    }
}

/// Seven Monday-first rows by ascending ISO week columns. `None` marks a
/// key with no underlying record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapGrid {
    pub weeks: Vec<u32>,
    pub rows: Vec<Vec<Option<HeatmapCell>>>,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
    iso_years: BTreeSet<i32>,
}

pub fn bin_weekly(records: &[EnrichedRecord]) -> HeatmapGrid {
    let mut groups: BTreeMap<(u32, u32), Accumulator> = BTreeMap::new();
    for record in records {
        let entry = groups.entry((record.weekday, record.iso_week)).or_default();
        entry.sum += record.normalized_activeness;
        entry.count += 1;
        entry.iso_years.insert(record.iso_year);
    }

    let weeks: Vec<u32> = groups
        .keys()
        .map(|&(_, week)| week)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut rows: Vec<Vec<Option<HeatmapCell>>> =
        vec![vec![None; weeks.len()]; WEEKDAY_LABELS.len()];
    for ((weekday, iso_week), acc) in groups {
        let Ok(column) = weeks.binary_search(&iso_week) else {
            continue;
        };
        let Some(row) = rows.get_mut(weekday as usize) else {
            continue;
        };
        row[column] = Some(HeatmapCell {
            weekday,
            iso_week,
            mean: acc.sum / acc.count as f64,
            count: acc.count,
            iso_years: acc.iso_years,
        });
    }

    let grid = HeatmapGrid { weeks, rows };
    let blended = grid.blended_cells().count();
    if blended > 0 {
        warn!(
            blended,
            "heatmap cells mix records from different ISO years under one week number"
        );
    }
    debug!(
        weeks = grid.weeks.len(),
        cells = grid.cells().count(),
        "binned weekly heatmap"
    );
    grid
}

impl HeatmapGrid {
    pub fn cell(&self, weekday: u32, iso_week: u32) -> Option<&HeatmapCell> {
        let column = self.weeks.binary_search(&iso_week).ok()?;
        self.rows.get(weekday as usize)?.get(column)?.as_ref()
    }

    pub fn value(&self, weekday: u32, iso_week: u32) -> Option<f64> {
        self.cell(weekday, iso_week).map(|cell| cell.mean)
    }

    pub fn cells(&self) -> impl Iterator<Item = &HeatmapCell> {
        self.rows.iter().flatten().flatten()
    }

    pub fn blended_cells(&self) -> impl Iterator<Item = &HeatmapCell> {
        self.cells().filter(|cell| cell.is_blended())
    }

    /// Row-major matrix of cell means, ready for a heatmap trace.
    pub fn z_matrix(&self) -> Vec<Vec<Option<f64>>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map(|cell| cell.mean))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use crate::metrics;
    use crate::models::DailyRecord;
    use chrono::NaiveDate;

    fn enriched(date: (i32, u32, u32), activeness: u32, max: u32) -> EnrichedRecord {
        let record = DailyRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            activeness,
            time_spent_minutes: 45,
            active_concentration_pct: 50,
            comprehension_pct: 50,
            break_frequency: 1,
            hyperactivity_incidents: 1,
            distraction_frequency: 1,
            task_completion_pct: 50,
        };
        EnrichedRecord::new(record, max)
    }

    fn full_year() -> Vec<EnrichedRecord> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let records = generator::generate(generator::DEFAULT_SEED, start).unwrap();
        metrics::normalize(&records).unwrap()
    }

    #[test]
    fn full_year_fills_every_weekday_and_week() {
        let grid = bin_weekly(&full_year());
        assert_eq!(grid.rows.len(), 7);
        assert_eq!(grid.weeks, (1..=52).collect::<Vec<_>>());
        assert_eq!(grid.cells().count(), 7 * 52);
    }

    #[test]
    fn cell_weighted_sum_matches_record_sum() {
        let records = full_year();
        let grid = bin_weekly(&records);
        let from_cells: f64 = grid.cells().map(|cell| cell.mean * cell.count as f64).sum();
        let from_records: f64 = records.iter().map(|record| record.normalized_activeness).sum();
        assert!((from_cells - from_records).abs() < 1e-9);
        assert_eq!(grid.cells().map(|cell| cell.count).sum::<usize>(), records.len());
    }

    #[test]
    fn duplicate_keys_are_averaged_and_flagged() {
        // 2023-01-01 is Sunday of ISO 2022-W52; 2023-12-31 is Sunday of 2023-W52.
        let records = vec![
            enriched((2023, 1, 1), 20, 100),
            enriched((2023, 12, 31), 60, 100),
        ];
        let grid = bin_weekly(&records);
        assert_eq!(grid.weeks, vec![52]);
        let cell = grid.cell(6, 52).unwrap();
        assert_eq!(cell.count, 2);
        assert!((cell.mean - 0.4).abs() < 1e-12);
        assert!(cell.is_blended());
        assert_eq!(grid.blended_cells().count(), 1);
    }

    #[test]
    fn missing_keys_stay_undefined_not_zero() {
        // Monday 2024-01-01 (W1) and Wednesday 2024-01-10 (W2), one zero reading.
        let records = vec![enriched((2024, 1, 1), 0, 50), enriched((2024, 1, 10), 50, 50)];
        let grid = bin_weekly(&records);
        assert_eq!(grid.weeks, vec![1, 2]);
        assert_eq!(grid.value(0, 1), Some(0.0));
        assert_eq!(grid.value(2, 2), Some(1.0));
        assert_eq!(grid.value(0, 2), None);
        assert_eq!(grid.value(6, 1), None);
        assert_eq!(grid.value(0, 30), None);

        let z = grid.z_matrix();
        assert_eq!(z.len(), 7);
        assert_eq!(z[0], vec![Some(0.0), None]);
        assert_eq!(z[2], vec![None, Some(1.0)]);
    }

    #[test]
    fn empty_input_gives_empty_columns() {
        let grid = bin_weekly(&[]);
        assert!(grid.weeks.is_empty());
        assert_eq!(grid.rows.len(), 7);
        assert_eq!(grid.cells().count(), 0);
    }
}
