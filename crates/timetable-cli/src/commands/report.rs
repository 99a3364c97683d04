//! Daily report command.

use clap::Args;

use super::{open_engine, parse_date};

#[derive(Args)]
pub struct ReportArgs {
    /// Day to report on (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date: Option<String>,
    /// Machine-readable output
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let date = parse_date(args.date.as_deref())?;
    let engine = open_engine()?;
    let report = engine.daily_report(date);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("report for {}", report.date);
    println!(
        "{} scheduled, {} logged, {} completed",
        report.scheduled, report.logged, report.completed
    );
    println!(
        "daily {}%   focus {:.1}   productivity {}",
        report.daily_percent.clamp(0, 100),
        report.avg_focus,
        report.productivity_score
    );
    for row in &report.rows {
        let status = match row.completed_percent {
            // clamp display only; the engine stores raw values
            Some(p) if row.done => format!("done ({}%)", p.clamp(0, 100)),
            Some(p) => format!("{}%", p.clamp(0, 100)),
            None => "not logged".to_string(),
        };
        println!("  {}  {}  {}", row.start_time, row.name, status);
    }
    Ok(())
}
