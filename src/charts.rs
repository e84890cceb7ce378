use chrono::NaiveDate;
use serde::Serialize;

use crate::heatmap::{self, HeatmapGrid};
use crate::models::DailyRecord;

/// Comprehension readings strictly above this are highlighted.
pub const COMPREHENSION_HIGHLIGHT_PCT: u32 = 85;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSymbol {
    Circle,
    Star,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub size: u8,
    pub symbol: MarkerSymbol,
    pub color: &'static str,
    pub outline_color: &'static str,
    pub outline_width: u8,
}

impl Marker {
    pub fn for_comprehension(pct: u32) -> Self {
        let highlighted = pct > COMPREHENSION_HIGHLIGHT_PCT;
        Self {
            size: if highlighted { 14 } else { 8 },
            symbol: if highlighted {
                MarkerSymbol::Star
            } else {
                MarkerSymbol::Circle
            },
            color: if highlighted { "yellow" } else { "blue" },
            outline_color: "black",
            outline_width: 1,
        }
    }

    pub fn is_highlight(&self) -> bool {
        self.symbol == MarkerSymbol::Star
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
    /// Per-point markers for the first series, when the chart decorates them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<Marker>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub colorscale: &'static str,
    pub zmin: f64,
    pub zmax: f64,
    pub x: Vec<u32>,
    pub y: [&'static str; 7],
    pub z: Vec<Vec<Option<f64>>>,
}

pub fn heatmap_chart(grid: &HeatmapGrid) -> HeatmapChart {
    HeatmapChart {
        title: "Activity Level Over Time (Darker Green = More Active)",
        x_label: "Week",
        y_label: "Day of the Week",
        colorscale: "Greens",
        zmin: heatmap::Z_MIN,
        zmax: heatmap::Z_MAX,
        x: grid.weeks.clone(),
        y: heatmap::WEEKDAY_LABELS,
        z: grid.z_matrix(),
    }
}

fn series(
    name: &'static str,
    records: &[DailyRecord],
    field: impl Fn(&DailyRecord) -> u32,
) -> Series {
    Series {
        name,
        points: records
            .iter()
            .map(|record| SeriesPoint {
                date: record.date,
                value: field(record) as f64,
            })
            .collect(),
    }
}

/// The four range charts shown under the heatmap.
pub fn line_charts(records: &[DailyRecord]) -> Vec<LineChart> {
    vec![
        LineChart {
            title: "Time Spent & Active Concentration Over Time",
            y_label: "Minutes / %",
            series: vec![
                series("Time Spent (min)", records, |r| r.time_spent_minutes),
                series("Active Concentration (%)", records, |r| {
                    r.active_concentration_pct
                }),
            ],
            markers: None,
        },
        LineChart {
            title: "Comprehension Score Over Time",
            y_label: "Comprehension Score (%)",
            series: vec![series("Comprehension Score (%)", records, |r| {
                r.comprehension_pct
            })],
            markers: Some(
                records
                    .iter()
                    .map(|r| Marker::for_comprehension(r.comprehension_pct))
                    .collect(),
            ),
        },
        LineChart {
            title: "Break Frequency & Hyperactivity Incidents Over Time",
            y_label: "Frequency",
            series: vec![
                series("Break Frequency", records, |r| r.break_frequency),
                series("Hyperactivity Incidents", records, |r| {
                    r.hyperactivity_incidents
                }),
            ],
            markers: None,
        },
        LineChart {
            title: "Distraction Frequency Over Time",
            y_label: "Frequency",
            series: vec![series("Distraction Frequency", records, |r| {
                r.distraction_frequency
            })],
            markers: None,
        },
    ]
}
