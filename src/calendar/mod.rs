//! Calendar core
//!
//! Moon phase estimation, event filtering, per-day grouping and the labels
//! shown in the club's month view. Everything here is pure and synchronous.

pub mod display;
pub mod filter;
pub mod grid;
pub mod moon;

pub use display::{EventStatus, LabelRules, status_badge, time_label};
pub use filter::{FilterCategory, FilterCriteria, FilterSelection, filter_events};
pub use grid::{DayCell, GridOptions, MonthGrid, events_for_day, events_in_month, group_by_day, month_days};
pub use moon::{CalendarDate, MoonInfo, MoonPhase, julian_day_number, moon_info, moon_phase};
