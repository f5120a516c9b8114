//! Terminal rendering of a dashboard snapshot.

use chrono::NaiveDateTime;
use timeleft_core::clock::{format_clock, format_date};
use timeleft_core::timeline::render_timeline;
use timeleft_core::{format_hours, Snapshot, Theme};

const BAR_WIDTH: usize = 24;

/// Date and live clock line.
pub fn header(now: &NaiveDateTime, theme: Theme) -> String {
    format!("{}  {}   {}\n", format_date(now), format_clock(now), theme.label())
}

pub fn dashboard(snapshot: &Snapshot) -> String {
    let r = &snapshot.result;
    let mut out = String::new();
    out.push_str(&format!(
        "Hours left     {}h of free time ({}% of your day)\n",
        format_hours(r.remaining_minutes),
        r.percentage_rounded()
    ));
    out.push_str(&format!("Remaining      {}\n", snapshot.chart.render_ascii(BAR_WIDTH)));
    out.push_str(&format!("Committed      {}h\n", format_hours(r.committed_minutes)));
    out.push_str(&format!("Free today     {}h\n", format_hours(r.total_free_minutes)));
    out.push_str(&format!(
        "Productivity   {}\n",
        snapshot.productivity.render_ascii(BAR_WIDTH)
    ));
    out.push_str("\nTimeline\n");
    out.push_str(&render_timeline(&snapshot.timeline));
    out
}
