//! Day view commands.

use clap::Subcommand;
use timetable_core::WorkItem;

use super::{open_engine, parse_date};

#[derive(Subcommand)]
pub enum DayAction {
    /// Items due on a day, sorted by start time
    Show {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Query by weekday index 0=Sunday .. 6=Saturday instead of a date
        #[arg(long, conflicts_with = "date")]
        weekday: Option<u8>,
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
    /// Items parked in the unscheduled backlog
    ParkingLot {
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
}

fn print_items(items: &[&WorkItem], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else if items.is_empty() {
        println!("nothing due");
    } else {
        for item in items {
            println!(
                "{}  {}  ({}, {}min, intensity {})",
                item.start_time, item.name, item.category, item.duration_minutes, item.intensity
            );
        }
    }
    Ok(())
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        DayAction::Show {
            date,
            weekday,
            json,
        } => {
            let mut due = match weekday {
                Some(day) => {
                    if day > 6 {
                        return Err(format!("weekday {day} is outside 0-6").into());
                    }
                    engine.due_on(day)
                }
                None => engine.due_on_date(parse_date(date.as_deref())?),
            };
            // display order only; the engine leaves ordering unspecified
            due.sort_by(|a, b| a.start_time.cmp(&b.start_time));
            print_items(&due, json)?;
        }
        DayAction::ParkingLot { json } => {
            let parked = engine.parking_lot();
            if json {
                println!("{}", serde_json::to_string_pretty(&parked)?);
            } else if parked.is_empty() {
                println!("parking lot is empty");
            } else {
                for item in parked {
                    println!("{}  {}", item.id, item.name);
                }
            }
        }
    }
    Ok(())
}
