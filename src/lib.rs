//! AstroClub calendar
//!
//! The calendar core of an astronomy club community platform. This library
//! provides moon phase estimation, event filtering and per-day grouping for the
//! club's month view, together with event storage and the calendar service
//! that ties them together.

pub mod calendar;
pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AstroClubError, Result};

// Re-export main components for easy access
pub use calendar::{FilterCriteria, MonthGrid, MoonPhase};
pub use database::DatabaseService;
pub use services::CalendarService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
