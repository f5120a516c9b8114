//! TOML-based application configuration.
//!
//! Stores settings that are not part of the day itself:
//! - Budget policies (score clamping, overlap handling)
//! - Default wake/sleep times for a fresh schedule
//! - Clock and recompute cadence
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::budget::BudgetOptions;
use crate::clock::Cadence;
use crate::error::{ConfigError, Result};
use crate::schedule::{DaySchedule, DEFAULT_SLEEP_TIME, DEFAULT_WAKE_TIME};
use crate::time_of_day::TimeOfDay;

/// Starting point for a schedule that has never been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_wake_time")]
    pub wake_time: TimeOfDay,
    #[serde(default = "default_sleep_time")]
    pub sleep_time: TimeOfDay,
}

/// Clock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_display_interval")]
    pub display_interval_secs: u64,
    #[serde(default = "default_recompute_interval")]
    pub recompute_interval_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub budget: BudgetOptions,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

fn default_wake_time() -> TimeOfDay {
    DEFAULT_WAKE_TIME
}
fn default_sleep_time() -> TimeOfDay {
    DEFAULT_SLEEP_TIME
}
fn default_display_interval() -> u64 {
    1
}
fn default_recompute_interval() -> u64 {
    60
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            wake_time: default_wake_time(),
            sleep_time: default_sleep_time(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            display_interval_secs: default_display_interval(),
            recompute_interval_secs: default_recompute_interval(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a single value; set its fields instead".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults there if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(_) => {
                debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field (wrong type, unknown policy name, malformed time).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn budget_options(&self) -> BudgetOptions {
        self.budget
    }

    pub fn cadence(&self) -> Cadence {
        Cadence {
            display_every: Duration::from_secs(self.clock.display_interval_secs.max(1)),
            recompute_every: Duration::from_secs(self.clock.recompute_interval_secs.max(1)),
        }
    }

    /// An empty schedule using the configured wake and sleep times.
    pub fn default_schedule(&self) -> DaySchedule {
        DaySchedule::new(self.defaults.wake_time, self.defaults.sleep_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{OverlapPolicy, ScorePolicy};

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(toml_str.contains("score_policy = \"unclamped\""));
        assert!(toml_str.contains("wake_time = \"07:00\""));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[budget]\nscore_policy = \"clamped\"\n").unwrap();
        assert_eq!(parsed.budget.score_policy, ScorePolicy::Clamped);
        assert_eq!(parsed.budget.overlap_policy, OverlapPolicy::NaiveSum);
        assert_eq!(parsed.clock.recompute_interval_secs, 60);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("budget.score_policy").as_deref(), Some("unclamped"));
        assert_eq!(cfg.get("defaults.sleep_time").as_deref(), Some("23:00"));
        assert_eq!(cfg.get("clock.display_interval_secs").as_deref(), Some("1"));
        assert!(cfg.get("budget.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_policies_and_times() {
        let mut cfg = Config::default();
        cfg.set("budget.overlap_policy", "clip_and_merge").unwrap();
        cfg.set("defaults.wake_time", "06:15").unwrap();
        cfg.set("clock.recompute_interval_secs", "30").unwrap();
        assert_eq!(cfg.budget.overlap_policy, OverlapPolicy::ClipAndMerge);
        assert_eq!(cfg.defaults.wake_time.to_string(), "06:15");
        assert_eq!(cfg.cadence().recompute_every, Duration::from_secs(30));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("budget.nonexistent", "x").unwrap_err();
        assert!(err.to_string().contains("budget.nonexistent"));
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("budget.score_policy", "sometimes").is_err());
        assert!(cfg.set("defaults.sleep_time", "25:00").is_err());
        assert!(cfg.set("clock.display_interval_secs", "soon").is_err());
        assert!(cfg.set("budget", "x").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("budget.score_policy", "clamped").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), changed);
    }

    #[test]
    fn unparsable_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "budget = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn default_schedule_uses_configured_times() {
        let mut cfg = Config::default();
        cfg.set("defaults.sleep_time", "01:00").unwrap();
        let s = cfg.default_schedule();
        assert_eq!(s.sleep_time.to_string(), "01:00");
        assert!(s.commitments.is_empty());
    }
}
