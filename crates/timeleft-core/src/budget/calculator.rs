//! The budget formula.
//!
//! ```text
//! total      = sleep - wake              (sleep + 1440 when sleep < wake)
//! committed  = sum of commitment lengths (see OverlapPolicy)
//! elapsed    = now - wake                (not wrapped, may be negative)
//! remaining  = max(0, total - (elapsed + committed))
//! free       = total - committed
//! percentage = clamp(remaining / total * 100, 0, 100)
//! score      = round(min(elapsed, free) / total * 100)
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::overlap::merged_commitment_minutes;
use super::result::{round_half_up, BudgetResult};
use crate::error::ValidationError;
use crate::schedule::DaySchedule;
use crate::time_of_day::TimeOfDay;

/// How the productivity score is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Raw formula: negative before wake, above 100 or below 0 when over-committed.
    #[default]
    Unclamped,
    /// Bounded to `[0, 100]`.
    Clamped,
}

/// How commitment time is totalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Add every complete commitment's length, overlaps and all.
    #[default]
    NaiveSum,
    /// Clip to the waking window and count overlapping time once.
    ClipAndMerge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetOptions {
    #[serde(default)]
    pub score_policy: ScorePolicy,
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

/// Compute the budget with the default (unclamped, naive-sum) options.
///
/// # Errors
/// Returns [`ValidationError::DegenerateWindow`] when wake and sleep are equal.
pub fn compute_budget(schedule: &DaySchedule, now: TimeOfDay) -> Result<BudgetResult, ValidationError> {
    compute_budget_with(schedule, now, &BudgetOptions::default())
}

/// Compute the budget with explicit policies.
///
/// # Errors
/// Returns [`ValidationError::DegenerateWindow`] when wake and sleep are equal.
pub fn compute_budget_with(
    schedule: &DaySchedule,
    now: TimeOfDay,
    options: &BudgetOptions,
) -> Result<BudgetResult, ValidationError> {
    let (wake, sleep) = schedule.waking_window();
    let total = sleep - wake;
    if total <= 0 {
        return Err(ValidationError::DegenerateWindow {
            wake: schedule.wake_time.to_string(),
            sleep: schedule.sleep_time.to_string(),
        });
    }

    let committed: i64 = match options.overlap_policy {
        OverlapPolicy::NaiveSum => schedule
            .complete_commitments()
            .filter_map(|c| c.duration_minutes())
            .sum(),
        OverlapPolicy::ClipAndMerge => merged_commitment_minutes(schedule),
    };

    let elapsed = now.minutes() - wake;
    let used = elapsed + committed;
    let remaining = (total - used).max(0);
    let free = total - committed;

    let percentage = (remaining as f64 / total as f64 * 100.0).clamp(0.0, 100.0);

    let efficient = elapsed.min(free);
    let mut score = round_half_up(efficient as f64 / total as f64 * 100.0);
    if options.score_policy == ScorePolicy::Clamped {
        score = score.clamp(0, 100);
    }

    trace!(total, committed, elapsed, remaining, score, "budget computed");

    Ok(BudgetResult {
        total_available_minutes: total,
        committed_minutes: committed,
        elapsed_minutes: elapsed,
        used_minutes: used,
        remaining_minutes: remaining,
        total_free_minutes: free,
        percentage_remaining: percentage,
        time_used_efficiently: efficient,
        productivity_score: score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Commitment;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn day(wake: &str, sleep: &str) -> DaySchedule {
        DaySchedule::new(t(wake), t(sleep))
    }

    #[test]
    fn workday_example() {
        let s = day("07:00", "23:00").with_commitment(Commitment::new("Work", t("09:00"), t("17:00")));
        let r = compute_budget(&s, t("12:00")).unwrap();

        assert_eq!(r.total_available_minutes, 960);
        assert_eq!(r.elapsed_minutes, 300);
        assert_eq!(r.committed_minutes, 480);
        assert_eq!(r.used_minutes, 780);
        assert_eq!(r.remaining_minutes, 180);
        assert_eq!(r.total_free_minutes, 480);
        assert!((r.percentage_remaining - 18.75).abs() < 1e-9);
        assert_eq!(r.percentage_rounded(), 19);
        assert_eq!(r.hours_left(), 3.0);
        assert_eq!(r.free_hours(), 8.0);
        assert_eq!(r.committed_hours(), 8.0);
        // min(300, 480) / 960 = 31.25%
        assert_eq!(r.productivity_score, 31);
    }

    #[test]
    fn window_wraps_past_midnight() {
        let r = compute_budget(&day("22:00", "06:00"), t("23:00")).unwrap();
        assert_eq!(r.total_available_minutes, 480);
        assert_eq!(r.elapsed_minutes, 60);
        assert_eq!(r.remaining_minutes, 420);
    }

    #[test]
    fn now_is_not_wrapped_against_sleep() {
        // After midnight in a 22:00-06:00 window the raw formula sees a
        // negative elapsed time, so nothing looks used yet.
        let r = compute_budget(&day("22:00", "06:00"), t("01:00")).unwrap();
        assert_eq!(r.elapsed_minutes, 60 - 1320);
        assert_eq!(r.remaining_minutes, 480 + 1260);
        assert_eq!(r.percentage_remaining, 100.0);
    }

    #[test]
    fn empty_list_leaves_all_time_free() {
        let r = compute_budget(&day("07:00", "23:00"), t("07:00")).unwrap();
        assert_eq!(r.committed_minutes, 0);
        assert_eq!(r.total_free_minutes, r.total_available_minutes);
        assert_eq!(r.elapsed_minutes, 0);
        assert_eq!(r.percentage_remaining, 100.0);
        assert_eq!(r.productivity_score, 0);
    }

    #[test]
    fn remaining_reaches_zero_at_sleep() {
        let r = compute_budget(&day("07:00", "23:00"), t("23:00")).unwrap();
        assert_eq!(r.remaining_minutes, 0);
        assert_eq!(r.percentage_remaining, 0.0);
        assert_eq!(r.productivity_score, 100);
    }

    #[test]
    fn incomplete_commitments_do_not_count() {
        let s = day("07:00", "23:00")
            .with_commitment(Commitment::parse("Gym", "18:00", "").unwrap())
            .with_commitment(Commitment::default());
        assert_eq!(compute_budget(&s, t("08:00")).unwrap().committed_minutes, 0);
    }

    #[test]
    fn wrapping_commitment_counts_its_full_length() {
        let s = day("07:00", "23:00").with_commitment(Commitment::new("Late", t("23:00"), t("01:00")));
        assert_eq!(compute_budget(&s, t("08:00")).unwrap().committed_minutes, 120);
    }

    #[test]
    fn over_commitment_is_not_an_error() {
        let s = day("07:00", "23:00")
            .with_commitment(Commitment::new("A", t("08:00"), t("20:00")))
            .with_commitment(Commitment::new("B", t("08:00"), t("20:00")));
        let r = compute_budget(&s, t("22:00")).unwrap();
        assert_eq!(r.committed_minutes, 1440);
        assert_eq!(r.total_free_minutes, -480);
        assert_eq!(r.remaining_minutes, 0);
        assert_eq!(r.time_used_efficiently, -480);
        assert_eq!(r.productivity_score, -50);
    }

    #[test]
    fn score_before_wake_is_negative_unless_clamped() {
        let s = day("07:00", "23:00");
        let raw = compute_budget(&s, t("05:00")).unwrap();
        assert_eq!(raw.elapsed_minutes, -120);
        assert_eq!(raw.productivity_score, -12); // -12.5 rounds up

        let opts = BudgetOptions {
            score_policy: ScorePolicy::Clamped,
            ..BudgetOptions::default()
        };
        assert_eq!(compute_budget_with(&s, t("05:00"), &opts).unwrap().productivity_score, 0);
    }

    #[test]
    fn clip_and_merge_policy_changes_committed_total() {
        let s = day("07:00", "23:00")
            .with_commitment(Commitment::new("Work", t("09:00"), t("17:00")))
            .with_commitment(Commitment::new("Overlap", t("16:00"), t("18:00")));
        let naive = compute_budget(&s, t("12:00")).unwrap();
        assert_eq!(naive.committed_minutes, 600);

        let opts = BudgetOptions {
            overlap_policy: OverlapPolicy::ClipAndMerge,
            ..BudgetOptions::default()
        };
        let merged = compute_budget_with(&s, t("12:00"), &opts).unwrap();
        assert_eq!(merged.committed_minutes, 540);
        assert_eq!(merged.remaining_minutes, 960 - 300 - 540);
    }

    #[test]
    fn equal_wake_and_sleep_is_degenerate() {
        let err = compute_budget(&day("08:00", "08:00"), t("09:00")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DegenerateWindow {
                wake: "08:00".into(),
                sleep: "08:00".into()
            }
        );
    }
}
