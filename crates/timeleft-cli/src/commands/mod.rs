pub mod commitment;
pub mod config;
pub mod day;
pub mod status;
pub mod theme;
pub mod timeline;
pub mod watch;

mod render;

use timeleft_core::{Config, Dashboard, PreferenceStore, TimeOfDay};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Open the saved dashboard with the configured policies and defaults.
pub fn open_dashboard() -> CliResult<Dashboard> {
    let config = Config::load_or_default();
    open_dashboard_with(&config)
}

pub fn open_dashboard_with(config: &Config) -> CliResult<Dashboard> {
    let store = PreferenceStore::open()?;
    Ok(Dashboard::load(
        store,
        config.budget_options(),
        config.default_schedule(),
    )?)
}

/// `--at` override, or the local wall clock.
pub fn resolve_now(at: Option<&str>) -> CliResult<TimeOfDay> {
    match at {
        Some(s) => Ok(TimeOfDay::parse(s)?),
        None => Ok(TimeOfDay::now_local()),
    }
}
