//! Calendar event filtering
//!
//! Criteria combine with AND across categories and OR within a category. An
//! empty category places no restriction on the events.

use serde::{Deserialize, Serialize};
use crate::models::{CalendarEvent, EventRef, EventType};

/// Filter categories offered by the calendar filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    EventType,
    Telescope,
    TeamMember,
    CelestialObject,
}

/// A single selectable value in one of the filter categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSelection {
    EventType(EventType),
    Telescope(String),
    TeamMember(String),
    CelestialObject(String),
}

impl FilterSelection {
    pub fn category(&self) -> FilterCategory {
        match self {
            FilterSelection::EventType(_) => FilterCategory::EventType,
            FilterSelection::Telescope(_) => FilterCategory::Telescope,
            FilterSelection::TeamMember(_) => FilterCategory::TeamMember,
            FilterSelection::CelestialObject(_) => FilterCategory::CelestialObject,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub event_types: Vec<EventType>,
    pub telescopes: Vec<String>,
    pub team_members: Vec<String>,
    pub celestial_objects: Vec<String>,
}

fn any_selected(refs: &[EventRef], selected: &[String]) -> bool {
    selected.is_empty() || refs.iter().any(|r| selected.contains(&r.id))
}

fn toggle_value<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the event satisfies every non-empty category
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        (self.event_types.is_empty() || self.event_types.contains(&event.event_type))
            && any_selected(&event.telescopes, &self.telescopes)
            && any_selected(&event.team_members, &self.team_members)
            && any_selected(&event.celestial_objects, &self.celestial_objects)
    }

    /// Matching events in their original order
    pub fn apply(&self, events: &[CalendarEvent]) -> Vec<CalendarEvent> {
        events.iter().filter(|event| self.matches(event)).cloned().collect()
    }

    /// Select the value if absent, deselect it otherwise
    pub fn toggle(&mut self, selection: FilterSelection) {
        match selection {
            FilterSelection::EventType(kind) => toggle_value(&mut self.event_types, kind),
            FilterSelection::Telescope(id) => toggle_value(&mut self.telescopes, id),
            FilterSelection::TeamMember(id) => toggle_value(&mut self.team_members, id),
            FilterSelection::CelestialObject(id) => toggle_value(&mut self.celestial_objects, id),
        }
    }

    pub fn is_selected(&self, selection: &FilterSelection) -> bool {
        match selection {
            FilterSelection::EventType(kind) => self.event_types.contains(kind),
            FilterSelection::Telescope(id) => self.telescopes.contains(id),
            FilterSelection::TeamMember(id) => self.team_members.contains(id),
            FilterSelection::CelestialObject(id) => self.celestial_objects.contains(id),
        }
    }

    pub fn clear(&mut self, category: FilterCategory) {
        match category {
            FilterCategory::EventType => self.event_types.clear(),
            FilterCategory::Telescope => self.telescopes.clear(),
            FilterCategory::TeamMember => self.team_members.clear(),
            FilterCategory::CelestialObject => self.celestial_objects.clear(),
        }
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }

    /// Number of selected values across all categories
    pub fn active_count(&self) -> usize {
        self.event_types.len()
            + self.telescopes.len()
            + self.team_members.len()
            + self.celestial_objects.len()
    }
}

/// Events matching all non-empty categories of `criteria`
pub fn filter_events(events: &[CalendarEvent], criteria: &FilterCriteria) -> Vec<CalendarEvent> {
    criteria.apply(events)
}
