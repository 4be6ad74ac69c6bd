//! Error handling for AstroClub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the AstroClub calendar
#[derive(Error, Debug)]
pub enum AstroClubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for AstroClub operations
pub type Result<T> = std::result::Result<T, AstroClubError>;

impl AstroClubError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            AstroClubError::Database(_) => false,
            AstroClubError::Migration(_) => false,
            AstroClubError::Config(_) => false,
            AstroClubError::ConfigLoad(_) => false,
            AstroClubError::EventNotFound { .. } => false,
            AstroClubError::InvalidDate { .. } => false,
            AstroClubError::UnknownEventType(_) => false,
            AstroClubError::Serialization(_) => false,
            AstroClubError::Io(_) => true,
            AstroClubError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AstroClubError::Database(_) => ErrorSeverity::Critical,
            AstroClubError::Migration(_) => ErrorSeverity::Critical,
            AstroClubError::Config(_) => ErrorSeverity::Critical,
            AstroClubError::ConfigLoad(_) => ErrorSeverity::Critical,
            AstroClubError::EventNotFound { .. } => ErrorSeverity::Warning,
            AstroClubError::InvalidDate { .. } => ErrorSeverity::Info,
            AstroClubError::UnknownEventType(_) => ErrorSeverity::Warning,
            AstroClubError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_message() {
        let err = AstroClubError::InvalidDate { year: 2024, month: 2, day: 30 };
        assert_eq!(err.to_string(), "Invalid date: 2024-02-30");
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = AstroClubError::Config("missing database url".to_string());
        assert!(!err.is_recoverable());
        assert_eq!(err.severity().to_string(), "CRITICAL");
    }
}
