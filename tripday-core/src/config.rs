//! Global tripday configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::constants::{BUFFER_MINUTES, DEFAULT_DAY_END, DEFAULT_DAY_START, DEFAULT_DURATION_MINUTES};
use crate::error::{TripdayError, TripdayResult};
use crate::schedule::ScheduleOptions;
use crate::time::parse_time;

static DEFAULT_PLAN_DIR: &str = "~/trips";

fn default_plan_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PLAN_DIR)
}

fn default_day_start() -> String {
    DEFAULT_DAY_START.to_string()
}

fn default_day_end() -> String {
    DEFAULT_DAY_END.to_string()
}

fn default_buffer_minutes() -> u32 {
    BUFFER_MINUTES
}

fn default_duration_minutes() -> u32 {
    DEFAULT_DURATION_MINUTES
}

/// Configuration at ~/.config/tripday/config.toml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TripdayConfig {
    #[serde(default = "default_plan_dir")]
    pub plan_dir: PathBuf,

    #[serde(default = "default_day_start")]
    pub day_start: String,

    #[serde(default = "default_day_end")]
    pub day_end: String,

    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: u32,

    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
}

impl Default for TripdayConfig {
    fn default() -> Self {
        TripdayConfig {
            plan_dir: default_plan_dir(),
            day_start: default_day_start(),
            day_end: default_day_end(),
            buffer_minutes: default_buffer_minutes(),
            default_duration_minutes: default_duration_minutes(),
        }
    }
}

impl TripdayConfig {
    pub fn config_path() -> TripdayResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TripdayError::Config("Could not determine config directory".into()))?
            .join("tripday");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, writing a commented default file on first run.
    pub fn load() -> TripdayResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> TripdayResult<Self> {
        let config: TripdayConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| TripdayError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TripdayError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Plan directory with `~` expanded.
    pub fn plan_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.plan_dir.to_string_lossy()).into_owned())
    }

    /// Scheduling options from config. Malformed day bounds are a config error
    /// here, unlike activity times which are silently ignored.
    pub fn schedule_options(&self) -> TripdayResult<ScheduleOptions> {
        let day_start = parse_time(&self.day_start).ok_or_else(|| {
            TripdayError::Config(format!("day_start '{}' is not HH:MM", self.day_start))
        })?;
        let day_end = parse_time(&self.day_end).ok_or_else(|| {
            TripdayError::Config(format!("day_end '{}' is not HH:MM", self.day_end))
        })?;

        if day_end <= day_start {
            return Err(TripdayError::Config(format!(
                "day_end {} must be after day_start {}",
                self.day_end, self.day_start
            )));
        }

        Ok(ScheduleOptions {
            day_start,
            day_end,
            buffer_minutes: self.buffer_minutes,
            default_duration_minutes: self.default_duration_minutes,
            ..ScheduleOptions::default()
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TripdayResult<()> {
        let contents = format!(
            "\
# tripday configuration

# Where your plans live:
# plan_dir = \"{DEFAULT_PLAN_DIR}\"

# Day window used for slot suggestions and auto-scheduling:
# day_start = \"{DEFAULT_DAY_START}\"
# day_end = \"{DEFAULT_DAY_END}\"

# Gap between auto-scheduled activities, in minutes:
# buffer_minutes = {BUFFER_MINUTES}

# Duration assumed for activities without one, in minutes:
# default_duration_minutes = {DEFAULT_DURATION_MINUTES}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TripdayError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TripdayError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
