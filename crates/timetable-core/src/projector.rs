//! Day projections over the work registry.
//!
//! Read-only views answering "what is due on day X" and "what is parked".
//! Weekdays are indexed 0=Sunday through 6=Saturday to match the stored
//! recurrence pattern.

use chrono::{Datelike, NaiveDate};

use crate::work::registry::WorkRegistry;
use crate::work::WorkItem;

/// Weekday index (0=Sunday, 6=Saturday) for a calendar date.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Borrowed view over the registry for day-based queries.
pub struct DayProjector<'a> {
    registry: &'a WorkRegistry,
}

impl<'a> DayProjector<'a> {
    pub fn new(registry: &'a WorkRegistry) -> Self {
        DayProjector { registry }
    }

    /// Items recurring on the given weekday, parked items excluded.
    ///
    /// Ghost items stay visible; hiding them is a display concern.
    pub fn due_on(&self, weekday: u8) -> Vec<&'a WorkItem> {
        self.registry
            .iter()
            .filter(|w| !w.is_parking_lot && w.frequency_days.contains(&weekday))
            .collect()
    }

    /// Items due on a concrete date.
    ///
    /// Same as [`due_on`](Self::due_on) for the date's weekday, except
    /// items pinned to a single date (back-cast plan steps) only appear on
    /// that exact date rather than on every later week.
    pub fn due_on_date(&self, date: NaiveDate) -> Vec<&'a WorkItem> {
        let weekday = weekday_index(date);
        self.registry
            .iter()
            .filter(|w| {
                !w.is_parking_lot
                    && w.frequency_days.contains(&weekday)
                    && w.scheduled_date.map_or(true, |pinned| pinned == date)
            })
            .collect()
    }

    /// Every parked item, regardless of recurrence.
    pub fn parking_lot(&self) -> Vec<&'a WorkItem> {
        self.registry.iter().filter(|w| w.is_parking_lot).collect()
    }
}
