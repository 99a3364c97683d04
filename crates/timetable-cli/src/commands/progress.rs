//! Daily completion logging commands.

use clap::Subcommand;
use timetable_core::progress::DEFAULT_FOCUS_QUALITY;
use timetable_core::{Config, Mood};

use super::{open_engine, parse_date};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Log completion for a work item on a day
    Log {
        /// Work item id
        work_id: String,
        /// Completion percentage
        percent: i32,
        /// Day to log for (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Focus quality 1-10 (default from config)
        #[arg(long)]
        focus: Option<u8>,
        /// Mood: tired, neutral or energetic
        #[arg(long)]
        mood: Option<String>,
    },
    /// Show the log for a work item on a day
    Show {
        /// Work item id
        work_id: String,
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

fn parse_mood(s: &str) -> Result<Mood, String> {
    match s {
        "tired" => Ok(Mood::Tired),
        "neutral" => Ok(Mood::Neutral),
        "energetic" => Ok(Mood::Energetic),
        other => Err(format!(
            "unknown mood '{other}' (expected tired, neutral or energetic)"
        )),
    }
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine()?;

    match action {
        ProgressAction::Log {
            work_id,
            percent,
            date,
            focus,
            mood,
        } => {
            let date = parse_date(date.as_deref())?;
            // precedence: --focus, then a config value the user changed
            // from stock, then the ledger's own default
            let focus = focus.or_else(|| {
                let configured = Config::load_or_default().defaults.focus_quality;
                (configured != DEFAULT_FOCUS_QUALITY).then_some(configured)
            });
            let mood = mood.map(|m| parse_mood(&m)).transpose()?;

            let level_before = engine.profile().level;
            let outcome = engine.log_progress(&work_id, date, percent, focus, mood);
            let level_after = engine.profile().level;

            if outcome.created {
                println!("logged {percent}% for {work_id} on {date} (+{} xp)", outcome.xp_gained);
            } else {
                println!("updated log for {work_id} on {date} (no xp for edits)");
            }
            if level_after > level_before {
                println!("level up! now level {level_after}");
            }
        }
        ProgressAction::Show { work_id, date } => {
            let date = parse_date(date.as_deref())?;
            match engine.find_log(&work_id, date) {
                Some(log) => println!("{}", serde_json::to_string_pretty(log)?),
                None => println!("no log for {work_id} on {date}"),
            }
        }
    }
    Ok(())
}
