//! Timeline entry types.

use serde::{Deserialize, Serialize};

use crate::time_of_day::TimeOfDay;

/// Kind of timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Wake,
    Commitment,
    Sleep,
}

impl TimelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wake => "wake",
            Self::Commitment => "commitment",
            Self::Sleep => "sleep",
        }
    }

    /// Marker shown next to the label.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Wake => "🌅",
            Self::Commitment => "•",
            Self::Sleep => "🌙",
        }
    }
}

/// A single row on the day timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub kind: TimelineKind,
    pub label: String,
    pub start: TimeOfDay,
    /// Only commitments have an end; it may still be unset.
    pub end: Option<TimeOfDay>,
}

impl TimelineEntry {
    pub fn marker(kind: TimelineKind, label: impl Into<String>, at: TimeOfDay) -> Self {
        Self {
            kind,
            label: label.into(),
            start: at,
            end: None,
        }
    }

    /// `HH:MM`, or `HH:MM - HH:MM` for commitments (blank end when unset).
    pub fn time_label(&self) -> String {
        match (self.kind, self.end) {
            (TimelineKind::Commitment, Some(end)) => format!("{} - {}", self.start, end),
            (TimelineKind::Commitment, None) => format!("{} - ", self.start),
            _ => self.start.to_string(),
        }
    }
}
