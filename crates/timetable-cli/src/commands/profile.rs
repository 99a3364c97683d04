//! Experience and profile commands.

use clap::Subcommand;
use timetable_core::{Equipment, FitnessGoal, ProfilePatch};

use super::open_engine;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show {
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
    /// Add experience directly (e.g. a challenge bonus)
    AddXp {
        /// Experience points to add
        amount: i64,
    },
    /// Update profile fields
    Set {
        /// Training goal: general, weight-loss, muscle or endurance
        #[arg(long)]
        goal: Option<String>,
        /// Comma-separated equipment tags (none, gym, dumbbells, yoga-mat)
        #[arg(long)]
        equipment: Option<String>,
        /// Streak counter override
        #[arg(long)]
        streak: Option<u32>,
        /// Experience override; the level is re-derived
        #[arg(long)]
        xp: Option<i64>,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine()?;

    match action {
        ProfileAction::Show { json } => {
            let profile = engine.profile();
            if json {
                println!("{}", serde_json::to_string_pretty(profile)?);
            } else {
                println!("level {}   {} xp   streak {}", profile.level, profile.xp, profile.streak);
                let equipment: Vec<String> = profile
                    .available_equipment
                    .iter()
                    .map(|e| e.to_string())
                    .collect();
                println!("goal: {:?}   equipment: {}", profile.fitness_goal, equipment.join(", "));
            }
        }
        ProfileAction::AddXp { amount } => {
            let level_before = engine.profile().level;
            let profile = engine.add_xp(amount);
            println!("{} xp, level {}", profile.xp, profile.level);
            if profile.level > level_before {
                println!("level up! now level {}", profile.level);
            }
        }
        ProfileAction::Set {
            goal,
            equipment,
            streak,
            xp,
        } => {
            let patch = ProfilePatch {
                xp,
                streak,
                fitness_goal: goal.map(|g| g.parse::<FitnessGoal>()).transpose()?,
                available_equipment: equipment
                    .map(|tags| {
                        tags.split(',')
                            .map(|t| t.trim().parse::<Equipment>())
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .transpose()?,
            };
            let profile = engine.update_profile(&patch);
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }
    Ok(())
}
