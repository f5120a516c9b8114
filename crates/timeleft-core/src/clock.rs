//! Wall-clock source and refresh cadence.
//!
//! The calculator never reads the clock itself; front ends ask a [`Clock`]
//! and pass the time in.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::time_of_day::TimeOfDay;

pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from(self.now())
    }
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// How often the display clock ticks and how often the budget is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    pub display_every: Duration,
    pub recompute_every: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            display_every: Duration::from_secs(1),
            recompute_every: Duration::from_secs(60),
        }
    }
}

impl Cadence {
    /// Display ticks between two recomputations, at least one.
    pub fn ticks_per_recompute(&self) -> u64 {
        let display = self.display_every.as_millis().max(1);
        (self.recompute_every.as_millis() / display).max(1) as u64
    }
}

/// `HH:MM:SS`
pub fn format_clock(now: &NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

/// e.g. `Monday, October 19, 2026`
pub fn format_date(now: &NaiveDateTime) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn fixed_clock_reports_its_instant() {
        let clock = FixedClock(at(12, 34, 56));
        assert_eq!(clock.time_of_day().to_string(), "12:34");
    }

    #[test]
    fn clock_and_date_formatting() {
        let now = at(9, 5, 7);
        assert_eq!(format_clock(&now), "09:05:07");
        assert_eq!(format_date(&now), "Monday, October 19, 2026");
    }

    #[test]
    fn default_cadence_is_second_and_minute() {
        let c = Cadence::default();
        assert_eq!(c.ticks_per_recompute(), 60);

        let odd = Cadence {
            display_every: Duration::from_secs(5),
            recompute_every: Duration::from_secs(2),
        };
        assert_eq!(odd.ticks_per_recompute(), 1);
    }
}
