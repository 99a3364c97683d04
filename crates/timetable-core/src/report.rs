//! Daily progress reporting.
//!
//! A pure summary over the registry and ledger for one explicit day: which
//! scheduled items were logged, a weight-adjusted completion percentage,
//! average focus, and the combined productivity score.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::progress::ProgressLedger;
use crate::projector::DayProjector;
use crate::work::registry::WorkRegistry;
use crate::work::Category;

/// Per-item line of a daily report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub work_id: String,
    pub name: String,
    pub category: Category,
    pub start_time: String,
    pub duration_minutes: u32,
    /// Importance weight used in the aggregate (1 when unset on the item)
    pub weight: u8,
    pub expected_goal_percent: u8,
    /// Logged completion, if a log exists for the day
    pub completed_percent: Option<i32>,
    /// Logged focus quality, if a log exists for the day
    pub focus_quality: Option<u8>,
    /// Whether the logged completion reached the item's goal
    pub done: bool,
}

/// Aggregated view of one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    /// Items due on this date
    pub scheduled: usize,
    /// How many of them have a log
    pub logged: usize,
    /// How many logged items reached their goal
    pub completed: usize,
    /// Weight-adjusted completion percentage across the day (0 when
    /// nothing is scheduled)
    pub daily_percent: i64,
    /// Mean focus quality over logged items (0 when nothing is logged)
    pub avg_focus: f64,
    /// `round(daily_percent * avg_focus / 10)`
    pub productivity_score: i64,
    pub rows: Vec<ReportRow>,
}

/// Build the daily report for `date`.
///
/// Only items due on that date count: parked items never do, and plan
/// steps pinned to another date are skipped. Each item contributes
/// `expected_goal_percent * weight` to the expected total; its log, when
/// present, contributes `completed_percent * weight` to the done total.
/// Logs for items not due that day are ignored.
pub fn daily_report(
    registry: &WorkRegistry,
    ledger: &ProgressLedger,
    date: NaiveDate,
) -> DailyReport {
    let projector = DayProjector::new(registry);
    let due = projector.due_on_date(date);

    let mut rows = Vec::with_capacity(due.len());
    let mut expected_total: i64 = 0;
    let mut done_total: i64 = 0;
    let mut focus_total: i64 = 0;
    let mut logged = 0usize;
    let mut completed = 0usize;

    for item in due {
        let weight = item.weight.unwrap_or(1);
        expected_total += i64::from(item.expected_goal_percent) * i64::from(weight);

        let log = ledger.find(&item.id, date);
        if let Some(log) = log {
            done_total += i64::from(log.completed_percent) * i64::from(weight);
            focus_total += i64::from(log.focus_quality);
            logged += 1;
            if log.completed_percent >= i32::from(item.expected_goal_percent) {
                completed += 1;
            }
        }

        rows.push(ReportRow {
            work_id: item.id.clone(),
            name: item.name.clone(),
            category: item.category,
            start_time: item.start_time.clone(),
            duration_minutes: item.duration_minutes,
            weight,
            expected_goal_percent: item.expected_goal_percent,
            completed_percent: log.map(|l| l.completed_percent),
            focus_quality: log.map(|l| l.focus_quality),
            done: log
                .map(|l| l.completed_percent >= i32::from(item.expected_goal_percent))
                .unwrap_or(false),
        });
    }

    let daily_percent = if expected_total > 0 {
        ((done_total as f64 / expected_total as f64) * 100.0).round() as i64
    } else {
        0
    };
    let avg_focus = if logged > 0 {
        focus_total as f64 / logged as f64
    } else {
        0.0
    };
    let productivity_score = ((daily_percent as f64 * avg_focus) / 10.0).round() as i64;

    DailyReport {
        date,
        scheduled: rows.len(),
        logged,
        completed,
        daily_percent,
        avg_focus,
        productivity_score,
        rows,
    }
}
