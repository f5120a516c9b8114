//! Wall-clock times as minutes since midnight.
//!
//! A [`TimeOfDay`] is always in `0..=1439`. Parsing is strict: anything that
//! is not `H:MM`/`HH:MM` with an in-range hour and minute is rejected with
//! [`ValidationError::InvalidTimeFormat`] instead of producing a garbage value.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Minutes in a full day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Parse an `HH:MM` string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTimeFormat {
            input: input.to_string(),
        };

        let (h, m) = input.trim().split_once(':').ok_or_else(invalid)?;
        let hour = parse_component(h).ok_or_else(invalid)?;
        let minute = parse_component(m).ok_or_else(invalid)?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }

    /// Compile-time constructor for known-good constants.
    pub(crate) const fn at(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60);
        Self(hour * 60 + minute)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidTimeFormat {
                input: format!("{hour}:{minute:02}"),
            });
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    pub fn from_minutes(minutes: u32) -> Result<Self, ValidationError> {
        if i64::from(minutes) >= MINUTES_PER_DAY {
            return Err(ValidationError::InvalidTimeFormat {
                input: format!("{minutes} minutes"),
            });
        }
        Ok(Self(minutes as u16))
    }

    /// Time of day of any chrono value, seconds truncated.
    pub fn of<T: Timelike>(t: &T) -> Self {
        Self((t.hour() * 60 + t.minute()) as u16)
    }

    /// Current local wall-clock time.
    pub fn now_local() -> Self {
        Self::of(&chrono::Local::now())
    }

    pub fn minutes(self) -> i64 {
        i64::from(self.0)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0) / 60
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0) % 60
    }

    /// Forward distance to `other`, treating an earlier `other` as tomorrow.
    pub fn minutes_until(self, other: TimeOfDay) -> i64 {
        (other.minutes() - self.minutes()).rem_euclid(MINUTES_PER_DAY)
    }
}

fn parse_component(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self::of(&t)
    }
}

impl From<NaiveDateTime> for TimeOfDay {
    fn from(t: NaiveDateTime) -> Self {
        Self::of(&t)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
