//! Live dashboard: the clock ticks every display interval and the budget is
//! recomputed every recompute interval. A failed recomputation keeps the
//! previous frame's numbers on screen.

use std::io::{IsTerminal, Write};

use timeleft_core::{Clock, Config, Dashboard, Event, Snapshot, SystemClock, TimeOfDay};
use tracing::{debug, warn};

use super::{open_dashboard_with, render, CliResult};

/// Reload and recompute once. `last` is replaced only on success; a failure
/// comes back as the event to show beside the previous values.
fn recompute_step(
    dashboard: &mut Dashboard,
    now: TimeOfDay,
    last: &mut Option<Snapshot>,
) -> Option<Event> {
    if let Err(e) = dashboard.reload() {
        warn!(error = %e, "reload failed, computing from the schedule in memory");
    }
    match dashboard.recompute(now) {
        Ok(snapshot) => {
            *last = Some(snapshot);
            None
        }
        Err(e) => Some(Event::computation_failed(&e)),
    }
}

pub fn run(ticks: Option<u64>) -> CliResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(ticks))
}

async fn watch(max_ticks: Option<u64>) -> CliResult {
    let config = Config::load_or_default();
    let cadence = config.cadence();
    let mut dashboard = open_dashboard_with(&config)?;
    let clock = SystemClock;
    let clear_screen = std::io::stdout().is_terminal();

    let per_recompute = cadence.ticks_per_recompute();
    let mut interval = tokio::time::interval(cadence.display_every);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last: Option<Snapshot> = None;
    let mut failure: Option<Event> = None;
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => break,
        }

        let now = clock.now();
        if tick % per_recompute == 0 {
            failure = recompute_step(&mut dashboard, TimeOfDay::from(now), &mut last);
            debug!(tick, "recomputed");
        }

        let mut frame = String::new();
        if clear_screen {
            frame.push_str("\x1b[2J\x1b[H");
        }
        let theme = dashboard.theme().unwrap_or_else(|e| {
            warn!(error = %e, "theme unavailable");
            Default::default()
        });
        frame.push_str(&render::header(&now, theme));
        frame.push('\n');
        match &last {
            Some(snapshot) => frame.push_str(&render::dashboard(snapshot)),
            None => frame.push_str("No budget yet.\n"),
        }
        if let Some(Event::ComputationFailed { message, .. }) = &failure {
            frame.push_str(&format!("\n(showing previous values: {message})\n"));
        }

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(frame.as_bytes())?;
        stdout.flush()?;

        tick += 1;
        if max_ticks.is_some_and(|max| tick >= max) {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeleft_core::{BudgetOptions, DaySchedule, PreferenceStore};

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn file_dashboard(dir: &tempfile::TempDir) -> (Dashboard, std::path::PathBuf) {
        let path = dir.path().join("timeleft.db");
        let dashboard = Dashboard::load(
            PreferenceStore::open_at(&path).unwrap(),
            BudgetOptions::default(),
            DaySchedule::default(),
        )
        .unwrap();
        (dashboard, path)
    }

    #[test]
    fn store_error_does_not_stop_recomputation() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dashboard, path) = file_dashboard(&dir);
        dashboard.quick_add("Work", t("09:00"), t("17:00")).unwrap();

        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("DROP TABLE kv;")
            .unwrap();

        let mut last = None;
        assert!(recompute_step(&mut dashboard, t("12:00"), &mut last).is_none());
        assert_eq!(last.unwrap().result.remaining_minutes, 180);
    }

    #[test]
    fn failed_recompute_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dashboard, _) = file_dashboard(&dir);

        let mut last = None;
        assert!(recompute_step(&mut dashboard, t("12:00"), &mut last).is_none());
        let previous = last.clone();

        dashboard.set_sleep_time(t("07:00")).unwrap();
        let failure = recompute_step(&mut dashboard, t("12:01"), &mut last);
        assert!(matches!(failure, Some(Event::ComputationFailed { .. })));
        assert_eq!(last, previous);
    }
}
