//! Overlap-aware commitment measurement.
//!
//! Each complete commitment is laid onto the waking window (trying the
//! previous, same and next day so midnight-spanning windows line up),
//! clipped to it, and the union of the clipped intervals is measured.

use crate::schedule::DaySchedule;
use crate::time_of_day::MINUTES_PER_DAY;

/// Minutes of the waking window covered by at least one commitment.
pub fn merged_commitment_minutes(schedule: &DaySchedule) -> i64 {
    let (window_start, window_end) = schedule.waking_window();

    let mut intervals: Vec<(i64, i64)> = Vec::new();
    for commitment in schedule.complete_commitments() {
        let (Some(start), Some(duration)) = (commitment.start, commitment.duration_minutes()) else {
            continue;
        };
        for shift in [-MINUTES_PER_DAY, 0, MINUTES_PER_DAY] {
            let s = (start.minutes() + shift).max(window_start);
            let e = (start.minutes() + shift + duration).min(window_end);
            if e > s {
                intervals.push((s, e));
            }
        }
    }

    intervals.sort_unstable();

    let mut covered = 0;
    let mut current: Option<(i64, i64)> = None;
    for (s, e) in intervals {
        match current {
            Some((cs, ce)) if s <= ce => current = Some((cs, ce.max(e))),
            Some((cs, ce)) => {
                covered += ce - cs;
                current = Some((s, e));
            }
            None => current = Some((s, e)),
        }
    }
    if let Some((cs, ce)) = current {
        covered += ce - cs;
    }
    covered
}
