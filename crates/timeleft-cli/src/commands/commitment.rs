//! Commitment management commands for CLI.

use clap::Subcommand;
use timeleft_core::{format_hours, Commitment, CommitmentField, TimeOfDay};

use super::{open_dashboard, CliResult};

#[derive(Subcommand)]
pub enum CommitmentAction {
    /// List commitments in entry order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a commitment; any part may be left out and filled in later
    Add {
        /// Label, e.g. "Gym"
        #[arg(long)]
        name: Option<String>,
        /// Start time (HH:MM)
        #[arg(long)]
        start: Option<String>,
        /// End time (HH:MM); earlier than start means after midnight
        #[arg(long)]
        end: Option<String>,
    },
    /// Add a complete commitment in one step
    Quick {
        name: String,
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM)
        end: String,
    },
    /// Change one field of a commitment
    Update {
        /// Position shown by `list`
        index: usize,
        /// name, start or end
        field: String,
        /// New value; an empty string unsets a time
        value: String,
    },
    /// Remove a commitment
    Remove {
        /// Position shown by `list`
        index: usize,
    },
    /// Remove all commitments
    Clear,
}

pub fn run(action: CommitmentAction) -> CliResult {
    let mut dashboard = open_dashboard()?;

    match action {
        CommitmentAction::List { json } => {
            let commitments = &dashboard.schedule().commitments;
            if json {
                println!("{}", serde_json::to_string_pretty(commitments)?);
            } else if commitments.is_empty() {
                println!("No commitments yet. Add one to get started!");
            } else {
                for (i, c) in commitments.iter().enumerate() {
                    println!("{i:>3}  {}", describe(c));
                }
            }
        }
        CommitmentAction::Add { name, start, end } => {
            let commitment = Commitment::parse(
                name.as_deref().unwrap_or(""),
                start.as_deref().unwrap_or(""),
                end.as_deref().unwrap_or(""),
            )?;
            let event = if commitment == Commitment::default() {
                dashboard.add_blank()?
            } else {
                dashboard.add(commitment)?
            };
            if let timeleft_core::Event::CommitmentAdded { index, .. } = event {
                println!("commitment added at index {index}");
            }
        }
        CommitmentAction::Quick { name, start, end } => {
            let event = dashboard.quick_add(&name, TimeOfDay::parse(&start)?, TimeOfDay::parse(&end)?)?;
            if let Some(message) = event.notification() {
                println!("{message}");
            }
        }
        CommitmentAction::Update { index, field, value } => {
            let field: CommitmentField = field.parse()?;
            dashboard.update(index, field, &value)?;
            println!("{}", describe(&dashboard.schedule().commitments[index]));
        }
        CommitmentAction::Remove { index } => {
            dashboard.remove(index)?;
            println!("commitment {index} removed");
        }
        CommitmentAction::Clear => {
            dashboard.clear()?;
            println!("all commitments removed");
        }
    }
    Ok(())
}

fn describe(c: &Commitment) -> String {
    let time = |t: Option<TimeOfDay>| t.map(|t| t.to_string()).unwrap_or_else(|| "--:--".into());
    let name = if c.name.is_empty() { "(unnamed)" } else { c.name.as_str() };
    let length = match c.duration_minutes() {
        Some(minutes) => format!("{}h", format_hours(minutes)),
        None => "incomplete".to_string(),
    };
    format!("{} - {}  {name}  [{length}]", time(c.start), time(c.end))
}
