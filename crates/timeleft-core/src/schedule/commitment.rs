//! A single named, optionally timed commitment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::time_of_day::{TimeOfDay, MINUTES_PER_DAY};

/// Pre-committed, unavailable time in the day.
///
/// Either end may be missing while the user is still filling it in; such a
/// commitment is kept and displayed but contributes nothing to the budget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "optional_time")]
    pub start: Option<TimeOfDay>,
    #[serde(default, with = "optional_time")]
    pub end: Option<TimeOfDay>,
}

impl Commitment {
    pub fn new(name: impl Into<String>, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            name: name.into(),
            start: Some(start),
            end: Some(end),
        }
    }

    /// Build from raw `HH:MM` strings, where an empty string means "not set".
    pub fn parse(name: &str, start: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: name.to_string(),
            start: parse_optional(start)?,
            end: parse_optional(end)?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Length in minutes, wrapping past midnight when `end <= start`.
    ///
    /// Equal start and end count as a whole day.
    pub fn duration_minutes(&self) -> Option<i64> {
        let (start, end) = (self.start?, self.end?);
        let (s, e) = (start.minutes(), end.minutes());
        Some(if e > s { e - s } else { MINUTES_PER_DAY + e - s })
    }

    /// Overwrite one field from its raw string form.
    pub fn set_field(&mut self, field: CommitmentField, value: &str) -> Result<(), ValidationError> {
        match field {
            CommitmentField::Name => self.name = value.to_string(),
            CommitmentField::Start => self.start = parse_optional(value)?,
            CommitmentField::End => self.end = parse_optional(value)?,
        }
        Ok(())
    }
}

fn parse_optional(value: &str) -> Result<Option<TimeOfDay>, ValidationError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        TimeOfDay::parse(value).map(Some)
    }
}

/// Editable fields of a [`Commitment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentField {
    Name,
    Start,
    End,
}

impl FromStr for CommitmentField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            other => Err(ValidationError::InvalidValue {
                field: "field".into(),
                message: format!("unknown commitment field '{other}' (expected name, start or end)"),
            }),
        }
    }
}

impl fmt::Display for CommitmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Absent times are stored as `""`, the way an untouched time input reads.
mod optional_time {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<TimeOfDay>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.collect_str(t),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<TimeOfDay>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => TimeOfDay::parse(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}
