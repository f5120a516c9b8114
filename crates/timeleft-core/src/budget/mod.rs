//! Daily time budget calculation.
//!
//! Everything here is pure: a [`DaySchedule`](crate::DaySchedule) and the
//! current [`TimeOfDay`](crate::TimeOfDay) go in, a [`BudgetResult`] comes
//! out. Callers own the schedule and decide when to recompute.

mod calculator;
mod overlap;
mod result;

pub use calculator::{compute_budget, compute_budget_with, BudgetOptions, OverlapPolicy, ScorePolicy};
pub use overlap::merged_commitment_minutes;
pub use result::{format_hours, round_half_up, BudgetResult};
