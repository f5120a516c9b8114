use clap::Subcommand;
use timeleft_core::Theme;

use super::{open_dashboard, CliResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Set the theme
    Set {
        /// light or dark
        theme: String,
    },
    /// Switch between light and dark
    Toggle,
}

pub fn run(action: ThemeAction) -> CliResult {
    let mut dashboard = open_dashboard()?;
    match action {
        ThemeAction::Show => println!("{}", dashboard.theme()?),
        ThemeAction::Set { theme } => {
            let theme: Theme = theme.parse()?;
            dashboard.set_theme(theme)?;
            println!("{}", theme.label());
        }
        ThemeAction::Toggle => {
            dashboard.toggle_theme()?;
            println!("{}", dashboard.theme()?.label());
        }
    }
    Ok(())
}
