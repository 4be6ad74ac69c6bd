//! Time labels and status badges for calendar entries

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use crate::config::CalendarConfig;
use crate::models::CalendarEvent;
use crate::utils::errors::{AstroClubError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventStatus {
    /// Happening right now
    Now,
    /// Starts within the "soon" window
    Soon,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Now => "Now",
            EventStatus::Soon => "Soon",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LabelRules {
    pub all_day_threshold: Duration,
    pub default_duration: Duration,
    pub soon_threshold: Duration,
}

impl Default for LabelRules {
    fn default() -> Self {
        Self {
            all_day_threshold: Duration::hours(24),
            default_duration: Duration::minutes(60),
            soon_threshold: Duration::hours(24),
        }
    }
}

impl TryFrom<&CalendarConfig> for LabelRules {
    type Error = AstroClubError;

    fn try_from(config: &CalendarConfig) -> Result<Self> {
        let hours = |value: i64, name: &str| {
            Duration::try_hours(value)
                .ok_or_else(|| AstroClubError::Config(format!("{name} is out of range: {value} hours")))
        };

        Ok(Self {
            all_day_threshold: hours(config.all_day_threshold_hours, "All day threshold")?,
            default_duration: Duration::try_minutes(config.default_event_minutes).ok_or_else(|| {
                AstroClubError::Config(format!(
                    "Default event duration is out of range: {} minutes",
                    config.default_event_minutes
                ))
            })?,
            soon_threshold: hours(config.soon_threshold_hours, "Soon threshold")?,
        })
    }
}

impl LabelRules {
    pub fn is_all_day(&self, event: &CalendarEvent) -> bool {
        event.is_all_day
            || event
                .end
                .is_some_and(|end| end - event.start >= self.all_day_threshold)
    }

    /// "All day" or the start time, e.g. `9:00 PM`
    pub fn time_label(&self, event: &CalendarEvent) -> String {
        if self.is_all_day(event) {
            "All day".to_string()
        } else {
            event.start.format("%-I:%M %p").to_string()
        }
    }

    pub fn status_badge(&self, event: &CalendarEvent, now: DateTime<Utc>) -> Option<EventStatus> {
        let end = event.span_end_or(self.default_duration);
        if now > end {
            return None;
        }
        if now >= event.start {
            return Some(EventStatus::Now);
        }
        (event.start - now < self.soon_threshold).then_some(EventStatus::Soon)
    }
}

pub fn time_label(event: &CalendarEvent) -> String {
    LabelRules::default().time_label(event)
}

pub fn status_badge(event: &CalendarEvent, now: DateTime<Utc>) -> Option<EventStatus> {
    LabelRules::default().status_badge(event, now)
}
