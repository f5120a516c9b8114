use clap::Args;
use timeleft_core::{Clock, SystemClock};

use super::{open_dashboard, render, resolve_now, CliResult};

#[derive(Args)]
pub struct StatusArgs {
    /// Compute as if it were this time (HH:MM)
    #[arg(long)]
    pub at: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatusArgs) -> CliResult {
    let mut dashboard = open_dashboard()?;
    let now = resolve_now(args.at.as_deref())?;
    let snapshot = dashboard.recompute(now)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if args.at.is_none() {
        print!("{}", render::header(&SystemClock.now(), dashboard.theme()?));
    }
    print!("{}", render::dashboard(&snapshot));
    Ok(())
}

/// Explicit recalculation: recompute, save, confirm.
pub fn calculate(at: Option<String>) -> CliResult {
    let mut dashboard = open_dashboard()?;
    let now = resolve_now(at.as_deref())?;
    let (snapshot, event) = dashboard.refresh(now)?;

    print!("{}", render::dashboard(&snapshot));
    if let Some(message) = event.notification() {
        println!("\n{message}");
    }
    Ok(())
}
