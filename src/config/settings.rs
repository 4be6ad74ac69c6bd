//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

/// Calendar rendering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Events shown in a day cell before the "+N more" badge
    pub max_events_per_day: usize,
    pub week_starts_on: String,
    /// Upcoming events inside this window get the "Soon" badge
    pub soon_threshold_hours: i64,
    /// Assumed duration of events stored without an end
    pub default_event_minutes: i64,
    pub all_day_threshold_hours: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub directory: Option<String>,
    #[serde(default = "default_log_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub json: bool,
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_log_file_name() -> String {
    "astroclub.log".to_string()
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from the named file (extension optional) layered under the environment
    pub fn from_file(name: &str) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();
        let settings = config::Config::builder()
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", i64::from(defaults.database.max_connections))?
            .set_default("database.min_connections", i64::from(defaults.database.min_connections))?
            .set_default("logging.level", defaults.logging.level)?
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix("ASTROCLUB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::AstroClubError> {
        super::validation::validate_settings(self)
    }
}

impl CalendarConfig {
    /// First day of the calendar week, Monday when the setting is unrecognised
    pub fn week_start(&self) -> Weekday {
        self.week_starts_on.parse().unwrap_or(Weekday::Mon)
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            max_events_per_day: 3,
            week_starts_on: "monday".to_string(),
            soon_threshold_hours: 24,
            default_event_minutes: 60,
            all_day_threshold_hours: 24,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/astroclub".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: default_acquire_timeout(),
            },
            calendar: CalendarConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
                file_name: default_log_file_name(),
                json: false,
            },
        }
    }
}
