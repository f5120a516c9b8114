use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "timeleft", version, about = "TimeLeft: how much of your day is still free")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for the current (or given) time
    Status(commands::status::StatusArgs),
    /// Recalculate and save, with confirmation
    Calculate {
        /// Compute as if it were this time (HH:MM)
        #[arg(long)]
        at: Option<String>,
    },
    /// Wake and sleep times
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Commitment management
    Commitment {
        #[command(subcommand)]
        action: commands::commitment::CommitmentAction,
    },
    /// Show the day timeline
    Timeline {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Live clock with periodic recalculation
    Watch {
        /// Stop after this many clock ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TIMELEFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status(args) => commands::status::run(args),
        Commands::Calculate { at } => commands::status::calculate(at),
        Commands::Day { action } => commands::day::run(action),
        Commands::Commitment { action } => commands::commitment::run(action),
        Commands::Timeline { json } => commands::timeline::run(json),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Watch { ticks } => commands::watch::run(ticks),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "timeleft", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
