//! Deadline back-casting.
//!
//! Expands "reach this goal by date D" into one plan step per remaining
//! day, ramping intensity and session length as the deadline approaches.
//! Generation is pure; persisting the steps is the engine's job.

use chrono::{Duration, NaiveDate};

use crate::projector::weekday_index;
use crate::work::{Category, Equipment, WorkDraft};

/// Start time stamped on every generated step.
pub const PLAN_START_TIME: &str = "10:00";

/// Session length of the first step, in minutes.
pub const PLAN_BASE_DURATION_MIN: u32 = 60;

/// Session length growth per step, in minutes.
pub const PLAN_DURATION_STEP_MIN: u32 = 15;

/// Intensity ceiling for ramped steps.
pub const PLAN_MAX_INTENSITY: i64 = 10;

/// Number of whole days from `today` to `deadline`.
///
/// Zero or negative means the deadline is today or already past, in which
/// case there is nothing to plan.
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

/// Generate one plan step per day from `today` (inclusive) up to the
/// deadline (exclusive).
///
/// Step `i` (0-based) gets:
/// - name `"{name} (Day {i+1}/{total})"`
/// - intensity `min(10, base_intensity + i/2)`, so the ramp climbs one
///   point every two days
/// - duration `60 + i*15` minutes starting at 10:00
/// - category learning with no equipment
/// - a recurrence entry for its own weekday, pinned to its exact date so
///   the step does not reappear on later weeks
/// - the deadline itself, kept for later identification and removal
///
/// Returns an empty plan when the deadline is today or in the past.
pub fn plan(
    name: &str,
    deadline: NaiveDate,
    base_intensity: u8,
    today: NaiveDate,
) -> Vec<WorkDraft> {
    let diff_days = days_until(deadline, today);
    if diff_days <= 0 {
        return Vec::new();
    }

    (0..diff_days)
        .map(|i| {
            let day = today + Duration::days(i);
            let intensity = (i64::from(base_intensity) + i / 2).min(PLAN_MAX_INTENSITY);
            WorkDraft {
                name: format!("{} (Day {}/{})", name, i + 1, diff_days),
                category: Category::Learning,
                intensity: intensity as u8,
                equipment: vec![Equipment::None],
                start_time: PLAN_START_TIME.to_string(),
                duration_minutes: PLAN_BASE_DURATION_MIN + (i as u32) * PLAN_DURATION_STEP_MIN,
                weight: None,
                frequency_days: vec![weekday_index(day)],
                total_duration_days: 1,
                expected_goal_percent: 100,
                is_ghost: false,
                is_parking_lot: false,
                deadline: Some(deadline),
                scheduled_date: Some(day),
            }
        })
        .collect()
}
