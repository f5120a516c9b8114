//! Day timeline: wake, the labelled commitments in entry order, sleep.

mod item;

pub use item::{TimelineEntry, TimelineKind};

use crate::schedule::DaySchedule;

/// Build the display timeline for a schedule.
///
/// Commitments without a name or a start time are left off; they are still
/// part of the schedule and of the budget when complete.
pub fn build_timeline(schedule: &DaySchedule) -> Vec<TimelineEntry> {
    let mut entries = Vec::with_capacity(schedule.commitments.len() + 2);
    entries.push(TimelineEntry::marker(
        TimelineKind::Wake,
        "Wake Up",
        schedule.wake_time,
    ));

    entries.extend(schedule.commitments.iter().filter_map(|c| {
        let start = c.start?;
        if c.name.is_empty() {
            return None;
        }
        Some(TimelineEntry {
            kind: TimelineKind::Commitment,
            label: c.name.clone(),
            start,
            end: c.end,
        })
    }));

    entries.push(TimelineEntry::marker(
        TimelineKind::Sleep,
        "Sleep Time",
        schedule.sleep_time,
    ));
    entries
}

/// Plain-text rendering, one entry per line.
pub fn render_timeline(entries: &[TimelineEntry]) -> String {
    let width = entries
        .iter()
        .map(|e| e.time_label().len())
        .max()
        .unwrap_or(0);
    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{:<width$}  {} {}\n",
            entry.time_label(),
            entry.kind.icon(),
            entry.label,
        ));
    }
    output
}
