//! Services module
//!
//! This module contains business logic services

pub mod calendar;

// Re-export commonly used services
pub use calendar::{AgendaEntry, CalendarService, DayAgenda, EventSource, MonthView, StaticEventSource};
