use clap::Subcommand;
use timeleft_core::TimeOfDay;

use super::{open_dashboard, CliResult};

#[derive(Subcommand)]
pub enum DayAction {
    /// Show wake and sleep times
    Show {
        /// Output the whole saved schedule as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the wake time
    Wake {
        /// HH:MM
        time: String,
    },
    /// Set the sleep time (earlier than wake means after midnight)
    Sleep {
        /// HH:MM
        time: String,
    },
}

pub fn run(action: DayAction) -> CliResult {
    let mut dashboard = open_dashboard()?;
    match action {
        DayAction::Show { json } => {
            let schedule = dashboard.schedule();
            if json {
                println!("{}", serde_json::to_string_pretty(schedule)?);
            } else {
                let (wake, sleep) = schedule.waking_window();
                println!("wake:  {}", schedule.wake_time);
                println!("sleep: {}", schedule.sleep_time);
                println!("awake: {}h", timeleft_core::format_hours(sleep - wake));
            }
        }
        DayAction::Wake { time } => {
            let time = TimeOfDay::parse(&time)?;
            dashboard.set_wake_time(time)?;
            println!("wake time set to {time}");
        }
        DayAction::Sleep { time } => {
            let time = TimeOfDay::parse(&time)?;
            dashboard.set_sleep_time(time)?;
            println!("sleep time set to {time}");
        }
    }
    Ok(())
}
