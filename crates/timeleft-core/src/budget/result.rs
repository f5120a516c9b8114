use serde::{Deserialize, Serialize};

/// Output of one budget computation. All minute values may be negative or
/// exceed the window where noted; nothing here is clamped unless stated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResult {
    /// Length of the waking window, in `(0, 1440]`.
    pub total_available_minutes: i64,
    /// Time taken by complete commitments.
    pub committed_minutes: i64,
    /// `now - wake`, negative before waking.
    pub elapsed_minutes: i64,
    /// `elapsed + committed`.
    pub used_minutes: i64,
    /// Free time still ahead, never below zero.
    pub remaining_minutes: i64,
    /// `total - committed`, negative when over-committed.
    pub total_free_minutes: i64,
    /// `remaining / total` as a percentage, clamped to `[0, 100]`.
    pub percentage_remaining: f64,
    /// `min(elapsed, total - committed)`.
    pub time_used_efficiently: i64,
    pub productivity_score: i64,
}

impl BudgetResult {
    pub fn hours_left(&self) -> f64 {
        tenths_of_hours(self.remaining_minutes) as f64 / 10.0
    }

    pub fn committed_hours(&self) -> f64 {
        tenths_of_hours(self.committed_minutes) as f64 / 10.0
    }

    pub fn free_hours(&self) -> f64 {
        tenths_of_hours(self.total_free_minutes) as f64 / 10.0
    }

    pub fn percentage_rounded(&self) -> i64 {
        round_half_up(self.percentage_remaining)
    }
}

/// Minutes as hours with one decimal, e.g. `180 -> "3.0"`.
///
/// Ties round away from zero on the magnitude (`15 -> "0.3"`).
pub fn format_hours(minutes: i64) -> String {
    let tenths = tenths_of_hours(minutes);
    let sign = if tenths < 0 { "-" } else { "" };
    let t = tenths.abs();
    format!("{sign}{}.{}", t / 10, t % 10)
}

fn tenths_of_hours(minutes: i64) -> i64 {
    let magnitude = (minutes.abs() * 10 + 30) / 60;
    if minutes < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Round to the nearest integer with halves going up (`-2.5 -> -2`, `2.5 -> 3`).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
