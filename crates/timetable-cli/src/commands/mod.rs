pub mod auth;
pub mod backcast;
pub mod config;
pub mod day;
pub mod profile;
pub mod progress;
pub mod report;
pub mod work;

use chrono::{Local, NaiveDate};
use timetable_core::TimetableEngine;

/// Open the engine over the user data directory.
pub fn open_engine() -> Result<TimetableEngine, Box<dyn std::error::Error>> {
    Ok(TimetableEngine::open_default()?)
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to today.
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(s) => Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{s}' (expected YYYY-MM-DD)"))?),
        None => Ok(Local::now().date_naive()),
    }
}

/// Parse a comma-separated weekday list like "1,3,5".
pub fn parse_days(days: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    days.split(',')
        .map(|s| {
            s.trim()
                .parse::<u8>()
                .map_err(|_| format!("invalid weekday '{}' (expected 0-6)", s.trim()).into())
        })
        .collect()
}
