use timeleft_core::timeline::{build_timeline, render_timeline};

use super::{open_dashboard, CliResult};

pub fn run(json: bool) -> CliResult {
    let dashboard = open_dashboard()?;
    let entries = build_timeline(dashboard.schedule());
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render_timeline(&entries));
    }
    Ok(())
}
