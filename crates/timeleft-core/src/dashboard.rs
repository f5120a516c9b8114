//! Dashboard state container.
//!
//! Owns the [`DaySchedule`] and the [`PreferenceStore`] it is saved to.
//! Every mutation is persisted before it returns. Computation goes through
//! the pure calculator; a failed recomputation leaves the last good result
//! in place so a front end can keep showing it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::budget::{compute_budget_with, BudgetOptions, BudgetResult};
use crate::chart::{DonutChart, ProgressBar};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::schedule::{Commitment, CommitmentField, DaySchedule};
use crate::storage::{PreferenceStore, Theme};
use crate::time_of_day::TimeOfDay;
use crate::timeline::{build_timeline, TimelineEntry};

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub now: TimeOfDay,
    pub result: BudgetResult,
    pub timeline: Vec<TimelineEntry>,
    pub chart: DonutChart,
    pub productivity: ProgressBar,
}

pub struct Dashboard {
    schedule: DaySchedule,
    store: PreferenceStore,
    options: BudgetOptions,
    last_result: Option<BudgetResult>,
}

impl Dashboard {
    /// Load the saved schedule from `store`, or start from `fallback` when
    /// nothing usable has been saved yet. Blank or malformed stored times
    /// take their value from `fallback` too.
    pub fn load(store: PreferenceStore, options: BudgetOptions, fallback: DaySchedule) -> Result<Self> {
        let schedule = store.load_schedule_or(&fallback)?;
        debug!(
            wake = %schedule.wake_time,
            sleep = %schedule.sleep_time,
            commitments = schedule.commitments.len(),
            "dashboard loaded"
        );
        Ok(Self {
            schedule,
            store,
            options,
            last_result: None,
        })
    }

    pub fn schedule(&self) -> &DaySchedule {
        &self.schedule
    }

    pub fn options(&self) -> &BudgetOptions {
        &self.options
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Result of the most recent successful recomputation.
    pub fn last_result(&self) -> Option<&BudgetResult> {
        self.last_result.as_ref()
    }

    /// Re-read the schedule from the store, picking up changes made by
    /// another process. Keeps the current schedule if nothing is stored.
    pub fn reload(&mut self) -> Result<()> {
        self.schedule = self.store.load_schedule_or(&self.schedule)?;
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.store.save_schedule(&self.schedule)
    }

    /// Apply `edit` to a copy of the schedule and keep it only once saved,
    /// so a failed save leaves memory and store in agreement.
    fn commit<T>(&mut self, edit: impl FnOnce(&mut DaySchedule) -> Result<T>) -> Result<T> {
        let mut next = self.schedule.clone();
        let out = edit(&mut next)?;
        self.store.save_schedule(&next)?;
        self.schedule = next;
        Ok(out)
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub fn set_wake_time(&mut self, time: TimeOfDay) -> Result<Event> {
        self.commit(|s| {
            s.set_wake_time(time);
            Ok(())
        })?;
        Ok(Event::WakeTimeChanged {
            wake_time: time.to_string(),
            at: Utc::now(),
        })
    }

    pub fn set_sleep_time(&mut self, time: TimeOfDay) -> Result<Event> {
        self.commit(|s| {
            s.set_sleep_time(time);
            Ok(())
        })?;
        Ok(Event::SleepTimeChanged {
            sleep_time: time.to_string(),
            at: Utc::now(),
        })
    }

    /// Append a row to be filled in later.
    pub fn add_blank(&mut self) -> Result<Event> {
        let index = self.commit(|s| Ok(s.add_blank()))?;
        Ok(Event::CommitmentAdded {
            index,
            name: String::new(),
            quick: false,
            at: Utc::now(),
        })
    }

    /// Append a commitment as entered, complete or not.
    pub fn add(&mut self, commitment: Commitment) -> Result<Event> {
        let name = commitment.name.clone();
        let index = self.commit(|s| Ok(s.add(commitment)))?;
        Ok(Event::CommitmentAdded {
            index,
            name,
            quick: false,
            at: Utc::now(),
        })
    }

    /// Append a fully specified commitment in one step.
    pub fn quick_add(&mut self, name: &str, start: TimeOfDay, end: TimeOfDay) -> Result<Event> {
        let index = self.commit(|s| Ok(s.add(Commitment::new(name, start, end))))?;
        Ok(Event::CommitmentAdded {
            index,
            name: name.to_string(),
            quick: true,
            at: Utc::now(),
        })
    }

    pub fn update(&mut self, index: usize, field: CommitmentField, value: &str) -> Result<Event> {
        self.commit(|s| Ok(s.update(index, field, value)?))?;
        Ok(Event::CommitmentUpdated {
            index,
            field,
            at: Utc::now(),
        })
    }

    pub fn remove(&mut self, index: usize) -> Result<Event> {
        let removed = self.commit(|s| Ok(s.remove(index)?))?;
        Ok(Event::CommitmentRemoved {
            index,
            name: removed.name,
            at: Utc::now(),
        })
    }

    pub fn clear(&mut self) -> Result<Event> {
        let removed = self.commit(|s| {
            let removed = s.commitments.len();
            s.clear();
            Ok(removed)
        })?;
        Ok(Event::CommitmentsCleared {
            removed,
            at: Utc::now(),
        })
    }

    // ── Computation ──────────────────────────────────────────────────

    /// Recompute the budget at `now`.
    ///
    /// # Errors
    /// Returns the validation error from the calculator; the previous result
    /// is kept. [`Event::computation_failed`] turns it into the event a front
    /// end shows next to the stale values.
    pub fn recompute(&mut self, now: TimeOfDay) -> Result<Snapshot, ValidationError> {
        match compute_budget_with(&self.schedule, now, &self.options) {
            Ok(result) => {
                self.last_result = Some(result.clone());
                Ok(Snapshot {
                    now,
                    chart: DonutChart::from_percentage(result.percentage_remaining),
                    productivity: ProgressBar::from_score(result.productivity_score),
                    timeline: build_timeline(&self.schedule),
                    result,
                })
            }
            Err(e) => {
                warn!(error = %e, "budget recomputation failed, keeping previous values");
                Err(e)
            }
        }
    }

    /// Explicit recalculation requested by the user.
    ///
    /// Saves the schedule along with the recomputation.
    pub fn refresh(&mut self, now: TimeOfDay) -> Result<(Snapshot, Event)> {
        let snapshot = self.recompute(now)?;
        self.persist()?;
        Ok((snapshot, Event::DashboardUpdated { at: Utc::now() }))
    }

    // ── Theme ────────────────────────────────────────────────────────

    pub fn theme(&self) -> Result<Theme> {
        Ok(self.store.load_theme()?)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Event> {
        self.store.save_theme(theme)?;
        Ok(Event::ThemeChanged {
            theme,
            at: Utc::now(),
        })
    }

    pub fn toggle_theme(&mut self) -> Result<Event> {
        let next = self.theme()?.toggled();
        self.set_theme(next)
    }
}
