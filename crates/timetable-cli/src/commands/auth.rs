//! Local sign-in and settings commands.

use clap::Subcommand;
use timetable_core::{AuthStore, JsonFileStore, SettingsPatch, ViewMode};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in as a user
    Login {
        /// Display name
        name: String,
        /// Email address
        email: String,
    },
    /// Create the local profile (same as login)
    Register {
        /// Display name
        name: String,
        /// Email address
        email: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Status,
    /// Update app settings
    Settings {
        /// View mode: grid or list
        #[arg(long)]
        view_mode: Option<String>,
        /// Show motivational copy in the UI
        #[arg(long)]
        show_motivation: Option<bool>,
    },
}

fn open_auth() -> Result<AuthStore, Box<dyn std::error::Error>> {
    Ok(AuthStore::load(Box::new(JsonFileStore::open_default()?))?)
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut auth = open_auth()?;

    match action {
        AuthAction::Login { name, email } | AuthAction::Register { name, email } => {
            let state = auth.login(&name, email);
            let user = state.user.as_ref().map(|u| u.name.as_str()).unwrap_or("");
            println!("signed in as {user}");
        }
        AuthAction::Logout => {
            auth.logout();
            println!("signed out");
        }
        AuthAction::Status => {
            let state = auth.state();
            match &state.user {
                Some(user) if state.is_authenticated => {
                    println!("signed in as {} <{}>", user.name, user.email);
                }
                _ => println!("signed out"),
            }
            println!(
                "view mode: {:?}   motivation: {}",
                state.settings.view_mode, state.settings.show_motivation
            );
        }
        AuthAction::Settings {
            view_mode,
            show_motivation,
        } => {
            let patch = SettingsPatch {
                view_mode: view_mode.map(|m| m.parse::<ViewMode>()).transpose()?,
                show_motivation,
            };
            let settings = auth.update_settings(&patch);
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
    }
    Ok(())
}
