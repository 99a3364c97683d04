//! Daily progress ledger.
//!
//! One log per (work item, day). Logging is an upsert: the first entry for
//! a pair earns experience, repeats only overwrite. The ledger is
//! deliberately permissive about values; validation lives at the work
//! registry boundary, not here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Focus quality assumed when the caller does not supply one.
pub const DEFAULT_FOCUS_QUALITY: u8 = 8;

/// Experience granted for the first log of a (work, day) pair.
pub const FIRST_LOG_BASE_XP: i64 = 50;

/// Extra experience per point of focus quality on a first log.
pub const FOCUS_XP_PER_POINT: i64 = 5;

/// Self-reported mood attached to a log entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Tired,
    Neutral,
    Energetic,
}

/// A single day's completion record for one work item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressLog {
    /// Id of the work item this log belongs to
    pub work_id: String,
    /// Calendar day the log covers
    pub date: NaiveDate,
    /// Reported completion percentage
    pub completed_percent: i32,
    /// Focus quality 1-10
    pub focus_quality: u8,
    /// Optional mood tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

/// Result of a [`ProgressLedger::log`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOutcome {
    /// Whether a new entry was created (false: an existing one was updated)
    pub created: bool,
    /// Experience earned by this call; zero on repeat logs
    pub xp_gained: i64,
}

/// Append-or-update store of progress logs.
#[derive(Debug, Clone, Default)]
pub struct ProgressLedger {
    logs: Vec<ProgressLog>,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously stored logs.
    pub fn from_logs(logs: Vec<ProgressLog>) -> Self {
        ProgressLedger { logs }
    }

    /// All logs, oldest first.
    pub fn logs(&self) -> &[ProgressLog] {
        &self.logs
    }

    /// The log for a (work item, day) pair, if any.
    pub fn find(&self, work_id: &str, date: NaiveDate) -> Option<&ProgressLog> {
        self.logs
            .iter()
            .find(|l| l.work_id == work_id && l.date == date)
    }

    /// Every log recorded for the given day.
    pub fn logs_for_date(&self, date: NaiveDate) -> Vec<&ProgressLog> {
        self.logs.iter().filter(|l| l.date == date).collect()
    }

    /// Upsert a completion record.
    ///
    /// The first log for a (work item, day) pair earns
    /// `50 + focus_quality * 5` experience. A repeat overwrites the stored
    /// percentages in place and earns nothing, so the same day cannot be
    /// farmed for experience. A missing focus quality defaults to
    /// [`DEFAULT_FOCUS_QUALITY`]; a mood is only written when given.
    ///
    /// The work id is not checked against the registry: logs for removed
    /// or never-registered items are kept as written.
    pub fn log(
        &mut self,
        work_id: &str,
        date: NaiveDate,
        completed_percent: i32,
        focus_quality: Option<u8>,
        mood: Option<Mood>,
    ) -> LogOutcome {
        let focus = focus_quality.unwrap_or(DEFAULT_FOCUS_QUALITY);

        if let Some(existing) = self
            .logs
            .iter_mut()
            .find(|l| l.work_id == work_id && l.date == date)
        {
            existing.completed_percent = completed_percent;
            existing.focus_quality = focus;
            if mood.is_some() {
                existing.mood = mood;
            }
            return LogOutcome {
                created: false,
                xp_gained: 0,
            };
        }

        self.logs.push(ProgressLog {
            work_id: work_id.to_string(),
            date,
            completed_percent,
            focus_quality: focus,
            mood,
        });
        LogOutcome {
            created: true,
            xp_gained: FIRST_LOG_BASE_XP + i64::from(focus) * FOCUS_XP_PER_POINT,
        }
    }
}
