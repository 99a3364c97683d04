use clap::{Parser, Subcommand};
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "timetable", version, about = "Timetable CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work item management
    Work {
        #[command(subcommand)]
        action: commands::work::WorkAction,
    },
    /// Daily completion logging
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Experience and profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Day views
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Plan backwards from a deadline
    Backcast(commands::backcast::BackcastArgs),
    /// Daily progress report
    Report(commands::report::ReportArgs),
    /// Local sign-in and app settings
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TIMETABLE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "timetable=debug,info"
        } else {
            "timetable=info,warn"
        })
    });

    let format = env::var("TIMETABLE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Work { action } => commands::work::run(action),
        Commands::Progress { action } => commands::progress::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Day { action } => commands::day::run(action),
        Commands::Backcast(args) => commands::backcast::run(args),
        Commands::Report(args) => commands::report::run(args),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
