//! Deadline back-casting command.

use chrono::{Local, NaiveDate};
use clap::Args;
use timetable_core::Config;

use super::open_engine;

#[derive(Args)]
pub struct BackcastArgs {
    /// Goal name, e.g. "Finals"
    pub name: String,
    /// Deadline date (YYYY-MM-DD)
    pub deadline: String,
    /// Base intensity of the first step (default from config)
    #[arg(long)]
    pub intensity: Option<u8>,
    /// Remove a previously generated plan for this deadline instead
    #[arg(long)]
    pub cancel: bool,
}

pub fn run(args: BackcastArgs) -> Result<(), Box<dyn std::error::Error>> {
    let deadline = NaiveDate::parse_from_str(&args.deadline, "%Y-%m-%d")
        .map_err(|_| format!("invalid deadline '{}' (expected YYYY-MM-DD)", args.deadline))?;
    let mut engine = open_engine()?;

    if args.cancel {
        let removed = engine.remove_backcast(deadline);
        println!("removed {removed} plan step(s) for {deadline}");
        return Ok(());
    }

    let config = Config::load_or_default();
    let intensity = args.intensity.unwrap_or(config.defaults.backcast_intensity);
    let today = Local::now().date_naive();

    let created = engine.backcast(&args.name, deadline, intensity, today)?;
    if created.is_empty() {
        println!("deadline {deadline} is today or already past, nothing planned");
    } else {
        println!("planned {} step(s) up to {deadline}:", created.len());
        for step in &created {
            println!(
                "  {}  {}min  intensity {}",
                step.name, step.duration_minutes, step.intensity
            );
        }
    }
    Ok(())
}
