use std::ops::Range;

use chrono::{Days, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::error::DashboardError;
use crate::models::DailyRecord;

pub const DEFAULT_SEED: u64 = 42;
pub const WINDOW_DAYS: usize = 365;

// Half-open draw ranges, one per field.
pub const ACTIVENESS: Range<u32> = 0..100;
pub const TIME_SPENT_MINUTES: Range<u32> = 10..120;
pub const ACTIVE_CONCENTRATION_PCT: Range<u32> = 0..100;
pub const COMPREHENSION_PCT: Range<u32> = 0..100;
pub const BREAK_FREQUENCY: Range<u32> = 0..10;
pub const HYPERACTIVITY_INCIDENTS: Range<u32> = 0..15;
pub const DISTRACTION_FREQUENCY: Range<u32> = 0..50;
pub const TASK_COMPLETION_PCT: Range<u32> = 0..100;

/// Builds `WINDOW_DAYS` consecutive records starting at `start`.
///
/// Each field is drawn as a full column before the next one, in declaration
/// order, so a given seed always reproduces the same sequence.
pub fn generate(seed: u64, start: NaiveDate) -> Result<Vec<DailyRecord>, DashboardError> {
    generate_days(seed, start, WINDOW_DAYS)
}

pub fn generate_days(
    seed: u64,
    start: NaiveDate,
    days: usize,
) -> Result<Vec<DailyRecord>, DashboardError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let activeness = draw_column(&mut rng, ACTIVENESS, days);
    let time_spent = draw_column(&mut rng, TIME_SPENT_MINUTES, days);
    let concentration = draw_column(&mut rng, ACTIVE_CONCENTRATION_PCT, days);
    let comprehension = draw_column(&mut rng, COMPREHENSION_PCT, days);
    let breaks = draw_column(&mut rng, BREAK_FREQUENCY, days);
    let hyperactivity = draw_column(&mut rng, HYPERACTIVITY_INCIDENTS, days);
    let distraction = draw_column(&mut rng, DISTRACTION_FREQUENCY, days);
    let task_completion = draw_column(&mut rng, TASK_COMPLETION_PCT, days);

    let mut records = Vec::with_capacity(days);
    for offset in 0..days {
        let date = start
            .checked_add_days(Days::new(offset as u64))
            .ok_or(DashboardError::DateOverflow { start, offset })?;
        records.push(DailyRecord {
            date,
            activeness: activeness[offset],
            time_spent_minutes: time_spent[offset],
            active_concentration_pct: concentration[offset],
            comprehension_pct: comprehension[offset],
            break_frequency: breaks[offset],
            hyperactivity_incidents: hyperactivity[offset],
            distraction_frequency: distraction[offset],
            task_completion_pct: task_completion[offset],
        });
    }

    debug!(seed, %start, days, "generated synthetic records");
    Ok(records)
}

fn draw_column(rng: &mut StdRng, range: Range<u32>, len: usize) -> Vec<u32> {
    (0..len).map(|_| rng.gen_range(range.clone())).collect()
}
