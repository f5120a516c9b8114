use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schedule::CommitmentField;
use crate::storage::Theme;

/// Every change made through the dashboard produces an Event.
/// Front ends decide which ones to surface as notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CommitmentAdded {
        index: usize,
        name: String,
        /// Added in one step with a complete time range.
        quick: bool,
        at: DateTime<Utc>,
    },
    CommitmentUpdated {
        index: usize,
        field: CommitmentField,
        at: DateTime<Utc>,
    },
    CommitmentRemoved {
        index: usize,
        name: String,
        at: DateTime<Utc>,
    },
    CommitmentsCleared {
        removed: usize,
        at: DateTime<Utc>,
    },
    WakeTimeChanged {
        wake_time: String,
        at: DateTime<Utc>,
    },
    SleepTimeChanged {
        sleep_time: String,
        at: DateTime<Utc>,
    },
    /// The user asked for an explicit recalculation.
    DashboardUpdated {
        at: DateTime<Utc>,
    },
    ThemeChanged {
        theme: Theme,
        at: DateTime<Utc>,
    },
    /// A recomputation failed; previous values stay on screen.
    ComputationFailed {
        message: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn computation_failed(error: &ValidationError) -> Self {
        Event::ComputationFailed {
            message: error.to_string(),
            at: Utc::now(),
        }
    }

    /// Pop-up text for events the user should see acknowledged.
    pub fn notification(&self) -> Option<String> {
        match self {
            Event::CommitmentAdded {
                name, quick: true, ..
            } => Some(format!("Added {name} to your schedule")),
            Event::DashboardUpdated { .. } => Some("Dashboard updated!".to_string()),
            _ => None,
        }
    }
}
