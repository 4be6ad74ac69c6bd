//! Calendar service implementation
//!
//! This service assembles the month view: it loads the events overlapping the
//! visible weeks, applies the filter criteria, groups the result into day cells
//! and collects the month's events for the side panel.

use std::future::Future;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};
use crate::calendar::{
    events_for_day, events_in_month, month_days, moon_info, FilterCriteria, GridOptions, LabelRules,
    MonthGrid, MoonInfo,
};
use crate::config::CalendarConfig;
use crate::database::EventRepository;
use crate::models::CalendarEvent;
use crate::utils::errors::{AstroClubError, Result};
use crate::utils::helpers::{end_of_day, start_of_day};
use crate::utils::logging::log_filter_applied;

/// Source of calendar events for a time window
pub trait EventSource {
    /// Events whose span overlaps `[from, to]`
    fn events_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<CalendarEvent>>> + Send;
}

impl EventSource for EventRepository {
    fn events_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<CalendarEvent>>> + Send {
        self.list_between(from, to)
    }
}

/// In-memory event source
#[derive(Debug, Clone, Default)]
pub struct StaticEventSource {
    events: Vec<CalendarEvent>,
}

impl StaticEventSource {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }
}

impl EventSource for StaticEventSource {
    fn events_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<CalendarEvent>>> + Send {
        let events: Vec<CalendarEvent> = self
            .events
            .iter()
            .filter(|event| event.overlaps(from, to))
            .cloned()
            .collect();
        async move { Ok(events) }
    }
}

/// Everything the month view renders
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub grid: MonthGrid,
    /// Events starting in the month, for the side panel
    pub panel: Vec<CalendarEvent>,
    pub active_filters: usize,
    pub total_events: usize,
    pub matched_events: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayAgenda {
    pub date: NaiveDate,
    pub moon: MoonInfo,
    pub entries: Vec<AgendaEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgendaEntry {
    pub event: CalendarEvent,
    pub time_label: String,
    pub status: Option<&'static str>,
}

/// Calendar service for building month and day views
#[derive(Clone)]
pub struct CalendarService<S> {
    source: S,
    config: CalendarConfig,
}

impl<S: EventSource> CalendarService<S> {
    pub fn new(source: S, config: CalendarConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Build the month grid for `year`/`month` with the given filters applied
    pub async fn month_view(&self, year: i32, month: u32, criteria: &FilterCriteria, today: NaiveDate) -> Result<MonthView> {
        let week_start = self.config.week_start();
        let days = month_days(year, month, week_start)?;
        let (Some(&first), Some(&last)) = (days.first(), days.last()) else {
            return Err(AstroClubError::InvalidInput(format!("No days to show for {year}-{month:02}")));
        };

        debug!(year = year, month = month, from = %first, to = %last, "Loading month events");
        let events = self.source.events_between(start_of_day(first), end_of_day(last)).await?;
        let filtered = criteria.apply(&events);
        log_filter_applied(criteria.active_count(), events.len(), filtered.len());

        let options = GridOptions {
            max_visible: self.config.max_events_per_day,
            week_start,
            today,
        };
        let grid = MonthGrid::build(year, month, &filtered, options)?;
        let panel = events_in_month(&filtered, year, month)?.into_iter().cloned().collect();

        info!(year = year, month = month, total = events.len(), matched = filtered.len(), "Month view built");

        Ok(MonthView {
            grid,
            panel,
            active_filters: criteria.active_count(),
            total_events: events.len(),
            matched_events: filtered.len(),
        })
    }

    /// Events of a single day with their labels, relative to `now`
    pub async fn day_agenda(&self, day: NaiveDate, criteria: &FilterCriteria, now: DateTime<Utc>) -> Result<DayAgenda> {
        let events = self.source.events_between(start_of_day(day), end_of_day(day)).await?;
        let filtered = criteria.apply(&events);
        let rules = LabelRules::try_from(&self.config)?;

        let entries = events_for_day(&filtered, day)
            .into_iter()
            .map(|event| AgendaEntry {
                time_label: rules.time_label(event),
                status: rules.status_badge(event, now).map(|status| status.label()),
                event: event.clone(),
            })
            .collect();

        Ok(DayAgenda {
            date: day,
            moon: moon_info(day),
            entries,
        })
    }
}
