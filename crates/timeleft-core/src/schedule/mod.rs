//! The day being budgeted: wake time, sleep time and commitments.
//!
//! [`DaySchedule`] is the single state container mutated by the front end.
//! It holds no derived values; budgets are recomputed from it on demand.

mod commitment;

pub use commitment::{Commitment, CommitmentField};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time_of_day::{TimeOfDay, MINUTES_PER_DAY};

pub const DEFAULT_WAKE_TIME: TimeOfDay = TimeOfDay::at(7, 0);
pub const DEFAULT_SLEEP_TIME: TimeOfDay = TimeOfDay::at(23, 0);

fn default_wake_time() -> TimeOfDay {
    DEFAULT_WAKE_TIME
}
fn default_sleep_time() -> TimeOfDay {
    DEFAULT_SLEEP_TIME
}

/// Wake/sleep times and the ordered commitment list.
///
/// Serialized in the persisted layout
/// `{ "wakeTime": "HH:MM", "sleepTime": "HH:MM", "commitments": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    #[serde(default = "default_wake_time")]
    pub wake_time: TimeOfDay,
    #[serde(default = "default_sleep_time")]
    pub sleep_time: TimeOfDay,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self {
            wake_time: DEFAULT_WAKE_TIME,
            sleep_time: DEFAULT_SLEEP_TIME,
            commitments: Vec::new(),
        }
    }
}

impl DaySchedule {
    pub fn new(wake_time: TimeOfDay, sleep_time: TimeOfDay) -> Self {
        Self {
            wake_time,
            sleep_time,
            commitments: Vec::new(),
        }
    }

    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitments.push(commitment);
        self
    }

    /// `(wake, sleep)` in minutes, with sleep moved past midnight when it
    /// falls before wake. Equal times give an empty window.
    pub fn waking_window(&self) -> (i64, i64) {
        let wake = self.wake_time.minutes();
        let mut sleep = self.sleep_time.minutes();
        if sleep < wake {
            sleep += MINUTES_PER_DAY;
        }
        (wake, sleep)
    }

    pub fn set_wake_time(&mut self, time: TimeOfDay) {
        self.wake_time = time;
    }

    pub fn set_sleep_time(&mut self, time: TimeOfDay) {
        self.sleep_time = time;
    }

    /// Append an empty row for the user to fill in. Returns its index.
    pub fn add_blank(&mut self) -> usize {
        self.add(Commitment::default())
    }

    /// Append a commitment. Returns its index.
    pub fn add(&mut self, commitment: Commitment) -> usize {
        self.commitments.push(commitment);
        self.commitments.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<Commitment, ValidationError> {
        self.check_index(index)?;
        Ok(self.commitments.remove(index))
    }

    pub fn update(
        &mut self,
        index: usize,
        field: CommitmentField,
        value: &str,
    ) -> Result<(), ValidationError> {
        self.check_index(index)?;
        self.commitments[index].set_field(field, value)
    }

    pub fn clear(&mut self) {
        self.commitments.clear();
    }

    /// Commitments with both ends set, in insertion order.
    pub fn complete_commitments(&self) -> impl Iterator<Item = &Commitment> {
        self.commitments.iter().filter(|c| c.is_complete())
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.commitments.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "commitments".into(),
                index,
                len: self.commitments.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn defaults_are_seven_to_eleven() {
        let s = DaySchedule::default();
        assert_eq!(s.wake_time.to_string(), "07:00");
        assert_eq!(s.sleep_time.to_string(), "23:00");
        assert!(s.commitments.is_empty());
    }

    #[test]
    fn waking_window_wraps_sleep_past_midnight() {
        assert_eq!(DaySchedule::new(t("07:00"), t("23:00")).waking_window(), (420, 1380));
        assert_eq!(DaySchedule::new(t("22:00"), t("06:00")).waking_window(), (1320, 1800));
        assert_eq!(DaySchedule::new(t("08:00"), t("08:00")).waking_window(), (480, 480));
    }

    #[test]
    fn list_operations_keep_insertion_order() {
        let mut s = DaySchedule::default();
        assert_eq!(s.add(Commitment::new("Work", t("09:00"), t("17:00"))), 0);
        assert_eq!(s.add_blank(), 1);
        assert_eq!(s.add(Commitment::new("Gym", t("18:00"), t("19:00"))), 2);

        s.update(1, CommitmentField::Name, "Lunch").unwrap();
        assert_eq!(s.commitments[1].name, "Lunch");
        assert_eq!(s.complete_commitments().count(), 2);

        let removed = s.remove(0).unwrap();
        assert_eq!(removed.name, "Work");
        let names: Vec<_> = s.commitments.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Lunch", "Gym"]);

        s.clear();
        assert!(s.commitments.is_empty());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut s = DaySchedule::default();
        assert_eq!(
            s.remove(0).unwrap_err(),
            ValidationError::OutOfBounds {
                collection: "commitments".into(),
                index: 0,
                len: 0
            }
        );
        assert!(s.update(3, CommitmentField::Start, "09:00").is_err());
    }

    #[test]
    fn persisted_layout_round_trips() {
        let json = r#"{
            "wakeTime": "06:30",
            "sleepTime": "00:30",
            "commitments": [{"name": "Work", "start": "09:00", "end": "17:00"},
                            {"name": "", "start": "", "end": ""}]
        }"#;
        let s: DaySchedule = serde_json::from_str(json).unwrap();
        assert_eq!(s.wake_time, t("06:30"));
        assert_eq!(s.commitments.len(), 2);
        assert!(!s.commitments[1].is_complete());

        let out = serde_json::to_value(&s).unwrap();
        assert_eq!(out["sleepTime"], "00:30");
        assert_eq!(out["commitments"][1]["start"], "");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let s: DaySchedule = serde_json::from_str("{}").unwrap();
        assert_eq!(s, DaySchedule::default());
    }
}
