use std::fmt::Write;

use crate::charts::{self, Marker};
use crate::dashboard::Dashboard;
use crate::filter::DateRange;
use crate::heatmap::{HeatmapGrid, WEEKDAY_LABELS};
use crate::models::{DailyRecord, MetricTile};

const SHADES: [char; 5] = ['░', '▒', '▓', '█', '█'];
const MISSING: char = '·';

pub fn shade(value: f64) -> char {
    let index = (value.clamp(0.0, 1.0) * 4.0).floor() as usize;
    SHADES[index.min(SHADES.len() - 1)]
}

pub fn render_tiles(tiles: &[MetricTile]) -> String {
    let mut output = String::new();
    for tile in tiles {
        let _ = writeln!(output, "- {}: {}", tile.label, tile.value);
    }
    output
}

/// Text heatmap: one line per weekday, one glyph per ISO week column.
pub fn render_heatmap(grid: &HeatmapGrid) -> String {
    let mut output = String::new();

    if grid.weeks.is_empty() {
        let _ = writeln!(output, "No activity recorded.");
        return output;
    }

    let first = grid.weeks.first().copied().unwrap_or_default();
    let last = grid.weeks.last().copied().unwrap_or_default();
    let _ = writeln!(output, "Weeks {first}..{last}");
    for (weekday, label) in WEEKDAY_LABELS.iter().enumerate() {
        let line: String = grid
            .weeks
            .iter()
            .map(|&week| grid.value(weekday as u32, week).map_or(MISSING, shade))
            .collect();
        let _ = writeln!(output, "{label} {line}");
    }
    let _ = writeln!(
        output,
        "Scale 0 {} 1, {MISSING} = no data",
        SHADES[..4].iter().collect::<String>()
    );

    let blended: Vec<String> = grid
        .blended_cells()
        .map(|cell| {
            format!(
                "{} W{:02} ({} records)",
                WEEKDAY_LABELS[cell.weekday as usize], cell.iso_week, cell.count
            )
        })
        .collect();
    if !blended.is_empty() {
        let _ = writeln!(
            output,
            "Cells averaging several ISO years: {}",
            blended.join(", ")
        );
    }

    output
}

pub fn render_series(records: &[DailyRecord]) -> String {
    let mut output = String::new();

    if records.is_empty() {
        let _ = writeln!(output, "No records in this range.");
        return output;
    }

    let _ = writeln!(
        output,
        "| Date | Time (min) | Concentration (%) | Comprehension (%) | Breaks | Hyperactivity | Distraction | Task Completion (%) |"
    );
    let _ = writeln!(output, "|---|---|---|---|---|---|---|---|");
    for record in records {
        let marker = if Marker::for_comprehension(record.comprehension_pct).is_highlight() {
            " ★"
        } else {
            ""
        };
        let _ = writeln!(
            output,
            "| {} | {} | {} | {}{} | {} | {} | {} | {} |",
            record.date,
            record.time_spent_minutes,
            record.active_concentration_pct,
            record.comprehension_pct,
            marker,
            record.break_frequency,
            record.hyperactivity_incidents,
            record.distraction_frequency,
            record.task_completion_pct
        );
    }

    output
}

pub fn build_report(dashboard: &Dashboard, range: DateRange, selected: &[DailyRecord]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Student Activity Dashboard");
    let _ = writeln!(
        output,
        "Synthetic data, seed {}, {} days from {}",
        dashboard.config.seed,
        dashboard.records.len(),
        dashboard.config.start_date
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Key Metrics");
    output.push_str(&render_tiles(&dashboard.summary.tiles()));

    let heatmap = charts::heatmap_chart(&dashboard.heatmap);
    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", heatmap.title);
    let _ = writeln!(output, "```");
    output.push_str(&render_heatmap(&dashboard.heatmap));
    let _ = writeln!(output, "```");

    let _ = writeln!(output);
    let _ = writeln!(output, "## Selected Range {} to {}", range.start, range.end);
    for chart in charts::line_charts(selected) {
        let names: Vec<&str> = chart.series.iter().map(|series| series.name).collect();
        let _ = writeln!(
            output,
            "- {} ({}): {}",
            chart.title,
            chart.y_label,
            names.join(", ")
        );
    }

    let highlights = selected
        .iter()
        .filter(|record| Marker::for_comprehension(record.comprehension_pct).is_highlight())
        .count();
    let _ = writeln!(
        output,
        "- Days with comprehension above {}%: {}",
        charts::COMPREHENSION_HIGHLIGHT_PCT,
        highlights
    );
    let _ = writeln!(output);
    output.push_str(&render_series(selected));

    output
}
