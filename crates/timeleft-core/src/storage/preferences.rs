//! SQLite-backed preference store.
//!
//! A single key-value table holding the persisted day schedule and the theme,
//! the same two entries a browser build keeps in local storage.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::data_dir;
use crate::error::{Result, StorageError, ValidationError};
use crate::schedule::{Commitment, DaySchedule};
use crate::time_of_day::TimeOfDay;

/// Key of the serialized [`DaySchedule`].
pub const SCHEDULE_KEY: &str = "timeLeftPrefs";
/// Key of the theme string.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Label shown on the toggle.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "☀️ Light Mode",
            Self::Dark => "🌙 Dark Mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ValidationError::InvalidValue {
                field: "theme".into(),
                message: format!("'{other}' is not one of light, dark"),
            }),
        }
    }
}

/// Persistent key-value store for user preferences.
pub struct PreferenceStore {
    conn: Connection,
}

impl PreferenceStore {
    /// Open the store at `<data_dir>/timeleft.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("timeleft.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        debug!(path = %path.display(), "preference store opened");
        Ok(store)
    }

    /// Open an in-memory store.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    /// Get a value from the kv store.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// The stored schedule, or the defaults when nothing usable is stored.
    pub fn load_schedule(&self) -> Result<DaySchedule> {
        self.load_schedule_or(&DaySchedule::default())
    }

    /// The stored schedule, reading each field on its own.
    ///
    /// A blank or malformed wake/sleep time falls back to the one in
    /// `fallback` without discarding the commitments. An unreadable record
    /// yields `fallback` as a whole.
    pub fn load_schedule_or(&self, fallback: &DaySchedule) -> Result<DaySchedule> {
        let Some(json) = self.get(SCHEDULE_KEY)? else {
            return Ok(fallback.clone());
        };
        let record: serde_json::Value = match serde_json::from_str(&json) {
            Ok(record @ serde_json::Value::Object(_)) => record,
            Ok(_) => {
                warn!("stored schedule is not an object, using defaults");
                return Ok(fallback.clone());
            }
            Err(e) => {
                warn!(error = %e, "stored schedule is unreadable, using defaults");
                return Ok(fallback.clone());
            }
        };

        let commitments = match record.get("commitments") {
            Some(serde_json::Value::Array(items)) => {
                items.iter().filter_map(stored_commitment).collect()
            }
            Some(serde_json::Value::Null) | None => Vec::new(),
            Some(_) => {
                warn!("stored commitments are not a list, starting empty");
                Vec::new()
            }
        };

        Ok(DaySchedule {
            wake_time: stored_time(&record, "wakeTime").unwrap_or(fallback.wake_time),
            sleep_time: stored_time(&record, "sleepTime").unwrap_or(fallback.sleep_time),
            commitments,
        })
    }

    pub fn save_schedule(&self, schedule: &DaySchedule) -> Result<()> {
        let json = serde_json::to_string(schedule)?;
        self.set(SCHEDULE_KEY, &json)?;
        debug!(commitments = schedule.commitments.len(), "schedule saved");
        Ok(())
    }

    /// The stored theme; anything but `light` reads as dark.
    pub fn load_theme(&self) -> Result<Theme, StorageError> {
        Ok(match self.get(THEME_KEY)?.as_deref() {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        })
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.set(THEME_KEY, theme.as_str())
    }
}

/// A wake/sleep field of a stored record; `None` when blank, missing or malformed.
fn stored_time(record: &serde_json::Value, key: &str) -> Option<TimeOfDay> {
    let raw = record.get(key)?.as_str()?;
    if raw.trim().is_empty() {
        warn!(key, "stored time is blank, using default");
        return None;
    }
    match TimeOfDay::parse(raw) {
        Ok(t) => Some(t),
        Err(e) => {
            warn!(key, error = %e, "stored time is malformed, using default");
            None
        }
    }
}

/// One stored commitment. Unparsable times read as unset rather than
/// dropping the row; entries that are not objects are skipped.
fn stored_commitment(item: &serde_json::Value) -> Option<Commitment> {
    let Some(fields) = item.as_object() else {
        warn!("skipping stored commitment that is not an object");
        return None;
    };
    let time = |key: &str| {
        let raw = fields.get(key)?.as_str()?;
        if raw.trim().is_empty() {
            return None;
        }
        TimeOfDay::parse(raw)
            .map_err(|e| warn!(key, error = %e, "stored commitment time is malformed"))
            .ok()
    };
    Some(Commitment {
        name: fields
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string(),
        start: time("start"),
        end: time("end"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let store = PreferenceStore::open_memory().unwrap();
        assert!(store.get("test").unwrap().is_none());
        store.set("test", "hello").unwrap();
        assert_eq!(store.get("test").unwrap().unwrap(), "hello");
        store.remove("test").unwrap();
        assert!(store.get("test").unwrap().is_none());
    }

    #[test]
    fn schedule_defaults_when_absent() {
        let store = PreferenceStore::open_memory().unwrap();
        assert_eq!(store.load_schedule().unwrap(), DaySchedule::default());
    }

    #[test]
    fn schedule_is_stored_under_prefs_key() {
        let store = PreferenceStore::open_memory().unwrap();
        let schedule = DaySchedule::default().with_commitment(Commitment::new(
            "Work",
            TimeOfDay::parse("09:00").unwrap(),
            TimeOfDay::parse("17:00").unwrap(),
        ));
        store.save_schedule(&schedule).unwrap();

        let raw = store.get(SCHEDULE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["wakeTime"], "07:00");
        assert_eq!(json["commitments"][0]["name"], "Work");

        assert_eq!(store.load_schedule().unwrap(), schedule);
    }

    #[test]
    fn corrupt_schedule_falls_back_to_defaults() {
        let store = PreferenceStore::open_memory().unwrap();
        store.set(SCHEDULE_KEY, "{not json").unwrap();
        assert_eq!(store.load_schedule().unwrap(), DaySchedule::default());
    }

    #[test]
    fn blank_wake_time_keeps_commitments() {
        let store = PreferenceStore::open_memory().unwrap();
        store
            .set(
                SCHEDULE_KEY,
                r#"{"wakeTime":"","sleepTime":"23:00","commitments":[{"name":"Work","start":"09:00","end":"17:00"}]}"#,
            )
            .unwrap();

        let loaded = store.load_schedule().unwrap();
        assert_eq!(loaded.wake_time.to_string(), "07:00");
        assert_eq!(loaded.commitments.len(), 1);
        assert_eq!(loaded.commitments[0].duration_minutes(), Some(480));

        let mut edited = loaded;
        edited.set_sleep_time(TimeOfDay::parse("23:30").unwrap());
        store.save_schedule(&edited).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&store.get(SCHEDULE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw["commitments"][0]["name"], "Work");
    }

    #[test]
    fn malformed_fields_fall_back_one_at_a_time() {
        let store = PreferenceStore::open_memory().unwrap();
        store
            .set(
                SCHEDULE_KEY,
                r#"{"wakeTime":"6am","sleepTime":"22:15","commitments":[{"name":"Gym","start":"18:00","end":"7pm"},42]}"#,
            )
            .unwrap();

        let fallback = DaySchedule::new(
            TimeOfDay::parse("05:30").unwrap(),
            TimeOfDay::parse("21:00").unwrap(),
        );
        let loaded = store.load_schedule_or(&fallback).unwrap();
        assert_eq!(loaded.wake_time.to_string(), "05:30");
        assert_eq!(loaded.sleep_time.to_string(), "22:15");
        assert_eq!(loaded.commitments.len(), 1);
        assert_eq!(loaded.commitments[0].name, "Gym");
        assert_eq!(loaded.commitments[0].end, None);
    }

    #[test]
    fn corrupt_schedule_uses_given_fallback() {
        let store = PreferenceStore::open_memory().unwrap();
        store.set(SCHEDULE_KEY, "[1, 2]").unwrap();
        let fallback = DaySchedule::new(
            TimeOfDay::parse("06:00").unwrap(),
            TimeOfDay::parse("22:00").unwrap(),
        );
        assert_eq!(store.load_schedule_or(&fallback).unwrap(), fallback);
    }

    #[test]
    fn theme_defaults_to_dark() {
        let store = PreferenceStore::open_memory().unwrap();
        assert_eq!(store.load_theme().unwrap(), Theme::Dark);
        store.save_theme(Theme::Light).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(store.load_theme().unwrap(), Theme::Light);
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(store.load_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn theme_parsing_and_toggle() {
        assert_eq!("Light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
