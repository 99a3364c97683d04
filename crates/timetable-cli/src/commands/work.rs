//! Work item management commands.

use clap::Subcommand;
use timetable_core::{Category, Equipment, WorkDraft, WorkPatch};

use super::{open_engine, parse_days};

#[derive(Subcommand)]
pub enum WorkAction {
    /// Register a new work item
    Add {
        /// Display name
        name: String,
        /// Category: work, fitness, learning or health
        #[arg(long, default_value = "work")]
        category: String,
        /// Effort level 1-10
        #[arg(long, default_value = "5")]
        intensity: u8,
        /// Start time as 24-hour HH:mm
        #[arg(long, default_value = "09:00")]
        start: String,
        /// Session length in minutes
        #[arg(long, default_value = "30")]
        duration: u32,
        /// Importance weight 1-5
        #[arg(long)]
        weight: Option<u8>,
        /// Comma-separated weekdays, 0=Sunday .. 6=Saturday (e.g. "1,3,5")
        #[arg(long)]
        days: Option<String>,
        /// Comma-separated equipment tags (none, gym, dumbbells, yoga-mat)
        #[arg(long)]
        equipment: Option<String>,
        /// Completion percentage that counts as done
        #[arg(long, default_value = "100")]
        goal: u8,
        /// Informational plan length in days
        #[arg(long, default_value = "1")]
        total_days: u32,
        /// Park the item in the unscheduled backlog
        #[arg(long)]
        park: bool,
    },
    /// List every work item
    List {
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
    /// Update fields of a work item
    Update {
        /// Work item id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        intensity: Option<u8>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        weight: Option<u8>,
        #[arg(long)]
        days: Option<String>,
        #[arg(long)]
        goal: Option<u8>,
    },
    /// Remove a work item (its progress logs are kept)
    Remove {
        /// Work item id
        id: String,
    },
    /// Move a work item into the parking lot
    Park {
        /// Work item id
        id: String,
    },
}

pub fn run(action: WorkAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine()?;

    match action {
        WorkAction::Add {
            name,
            category,
            intensity,
            start,
            duration,
            weight,
            days,
            equipment,
            goal,
            total_days,
            park,
        } => {
            let draft = WorkDraft {
                name,
                category: category.parse::<Category>()?,
                intensity,
                equipment: match equipment {
                    Some(tags) => tags
                        .split(',')
                        .map(|t| t.trim().parse::<Equipment>())
                        .collect::<Result<_, _>>()?,
                    None => Vec::new(),
                },
                start_time: start,
                duration_minutes: duration,
                weight,
                frequency_days: match days {
                    Some(d) => parse_days(&d)?,
                    None => Vec::new(),
                },
                total_duration_days: total_days,
                expected_goal_percent: goal,
                is_parking_lot: park,
                ..Default::default()
            };
            let item = engine.add_work(draft)?;
            println!("Work item created: {}", item.id);
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        WorkAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(engine.works())?);
            } else if engine.works().is_empty() {
                println!("no work items");
            } else {
                for item in engine.works() {
                    let days: Vec<String> =
                        item.frequency_days.iter().map(u8::to_string).collect();
                    let schedule = if item.is_parking_lot {
                        "parked".to_string()
                    } else if days.is_empty() {
                        "unscheduled".to_string()
                    } else {
                        format!("days [{}]", days.join(","))
                    };
                    println!(
                        "{}  {}  {} {} {}min  {}",
                        item.id, item.name, item.category, item.start_time,
                        item.duration_minutes, schedule
                    );
                }
            }
        }
        WorkAction::Update {
            id,
            name,
            category,
            intensity,
            start,
            duration,
            weight,
            days,
            goal,
        } => {
            let patch = WorkPatch {
                name,
                category: category.map(|c| c.parse::<Category>()).transpose()?,
                intensity,
                start_time: start,
                duration_minutes: duration,
                weight,
                frequency_days: days.map(|d| parse_days(&d)).transpose()?,
                expected_goal_percent: goal,
                ..Default::default()
            };
            match engine.update_work(&id, &patch)? {
                Some(item) => println!("{}", serde_json::to_string_pretty(&item)?),
                None => println!("no work item with id {id}"),
            }
        }
        WorkAction::Remove { id } => {
            if engine.remove_work(&id) {
                println!("removed {id}");
            } else {
                println!("no work item with id {id}");
            }
        }
        WorkAction::Park { id } => {
            let patch = WorkPatch {
                is_parking_lot: Some(true),
                ..Default::default()
            };
            match engine.update_work(&id, &patch)? {
                Some(item) => println!("parked {}", item.name),
                None => println!("no work item with id {id}"),
            }
        }
    }
    Ok(())
}
