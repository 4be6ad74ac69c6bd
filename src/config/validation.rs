//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use chrono::Weekday;
use crate::utils::errors::{AstroClubError, Result};
use super::Settings;

/// Longest "soon" or "all day" threshold accepted, one year
pub const MAX_THRESHOLD_HOURS: i64 = 24 * 366;

/// Longest default event duration accepted, one week
pub const MAX_EVENT_MINUTES: i64 = 7 * 24 * 60;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_calendar_config(&settings.calendar)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(AstroClubError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(AstroClubError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(AstroClubError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate calendar configuration
fn validate_calendar_config(config: &super::CalendarConfig) -> Result<()> {
    if config.max_events_per_day == 0 {
        return Err(AstroClubError::Config(
            "Max events per day must be greater than 0".to_string()
        ));
    }

    if config.week_starts_on.parse::<Weekday>().is_err() {
        return Err(AstroClubError::Config(
            format!("Invalid week start day: {}", config.week_starts_on)
        ));
    }

    if config.soon_threshold_hours < 0 {
        return Err(AstroClubError::Config(
            "Soon threshold cannot be negative".to_string()
        ));
    }

    if config.default_event_minutes <= 0 || config.all_day_threshold_hours <= 0 {
        return Err(AstroClubError::Config(
            "Event durations must be greater than 0".to_string()
        ));
    }

    if config.soon_threshold_hours > MAX_THRESHOLD_HOURS || config.all_day_threshold_hours > MAX_THRESHOLD_HOURS {
        return Err(AstroClubError::Config(
            format!("Thresholds cannot exceed {} hours", MAX_THRESHOLD_HOURS)
        ));
    }

    if config.default_event_minutes > MAX_EVENT_MINUTES {
        return Err(AstroClubError::Config(
            format!("Default event duration cannot exceed {} minutes", MAX_EVENT_MINUTES)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(AstroClubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(AstroClubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
