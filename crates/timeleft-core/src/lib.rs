//! # TimeLeft Core Library
//!
//! This library provides the core logic for TimeLeft, a daily time-budget
//! dashboard: given a wake time, a sleep time and a list of commitments it
//! works out how much free time is left in the day.
//!
//! ## Architecture
//!
//! - **Budget**: a pure calculator over minutes since midnight, with midnight
//!   wraparound for both the waking window and individual commitments
//! - **Schedule**: the single mutable state container, passed by reference
//!   into the calculator
//! - **Dashboard**: owns the schedule, persists every change and keeps the
//!   last good result when a recomputation fails
//! - **Storage**: SQLite key-value preferences and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`compute_budget`]: The budget calculation
//! - [`DaySchedule`]: Wake/sleep times and commitments
//! - [`Dashboard`]: State container wiring schedule, storage and calculator
//! - [`Config`]: Application configuration management

pub mod budget;
pub mod chart;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod schedule;
pub mod storage;
pub mod time_of_day;
pub mod timeline;

pub use budget::{
    compute_budget, compute_budget_with, format_hours, BudgetOptions, BudgetResult, OverlapPolicy,
    ScorePolicy,
};
pub use chart::{ChartBand, DonutChart, ProgressBar};
pub use clock::{Cadence, Clock, FixedClock, SystemClock};
pub use dashboard::{Dashboard, Snapshot};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use schedule::{Commitment, CommitmentField, DaySchedule};
pub use storage::{Config, PreferenceStore, Theme};
pub use time_of_day::TimeOfDay;
pub use timeline::{build_timeline, TimelineEntry, TimelineKind};
