//! Event model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use crate::utils::errors::AstroClubError;

/// Kind of calendar event, stored as upper snake case text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Eclipse,
    Moon,
    MeteorShower,
    Planetary,
    Comet,
    Star,
    Solstice,
    Equinox,
    Aurora,
    Occultation,
    Conjunction,
    Transit,
    BlueMoon,
    BloodMoon,
    HarvestMoon,
    Supermoon,
    Micromoon,
    Meeting,
    Workshop,
}

impl EventType {
    pub const ALL: [EventType; 19] = [
        EventType::Eclipse,
        EventType::Moon,
        EventType::MeteorShower,
        EventType::Planetary,
        EventType::Comet,
        EventType::Star,
        EventType::Solstice,
        EventType::Equinox,
        EventType::Aurora,
        EventType::Occultation,
        EventType::Conjunction,
        EventType::Transit,
        EventType::BlueMoon,
        EventType::BloodMoon,
        EventType::HarvestMoon,
        EventType::Supermoon,
        EventType::Micromoon,
        EventType::Meeting,
        EventType::Workshop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Eclipse => "ECLIPSE",
            EventType::Moon => "MOON",
            EventType::MeteorShower => "METEOR_SHOWER",
            EventType::Planetary => "PLANETARY",
            EventType::Comet => "COMET",
            EventType::Star => "STAR",
            EventType::Solstice => "SOLSTICE",
            EventType::Equinox => "EQUINOX",
            EventType::Aurora => "AURORA",
            EventType::Occultation => "OCCULTATION",
            EventType::Conjunction => "CONJUNCTION",
            EventType::Transit => "TRANSIT",
            EventType::BlueMoon => "BLUE_MOON",
            EventType::BloodMoon => "BLOOD_MOON",
            EventType::HarvestMoon => "HARVEST_MOON",
            EventType::Supermoon => "SUPERMOON",
            EventType::Micromoon => "MICROMOON",
            EventType::Meeting => "MEETING",
            EventType::Workshop => "WORKSHOP",
        }
    }

    /// Club gatherings as opposed to sky events
    pub fn is_club_activity(&self) -> bool {
        matches!(self, EventType::Meeting | EventType::Workshop)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = AstroClubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        EventType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| AstroClubError::UnknownEventType(s.to_string()))
    }
}

/// Named reference to a telescope, team member or celestial object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct EventRef {
    pub id: String,
    pub name: String,
}

impl EventRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// Calendar event together with its associations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub requirements: Option<String>,
    pub is_all_day: bool,
    pub created_by: Option<i64>,
    #[serde(default)]
    pub telescopes: Vec<EventRef>,
    #[serde(default)]
    pub team_members: Vec<EventRef>,
    #[serde(default)]
    pub celestial_objects: Vec<EventRef>,
}

impl CalendarEvent {
    /// Effective end of the event span; instantaneous events end where they start
    pub fn span_end(&self) -> DateTime<Utc> {
        self.end.unwrap_or(self.start)
    }

    /// Event span with a fallback duration for events stored without an end
    pub fn span_end_or(&self, default_duration: Duration) -> DateTime<Utc> {
        self.end.unwrap_or_else(|| {
            self.start
                .checked_add_signed(default_duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
    }

    /// Whether the event span intersects `[from, to]`
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.start <= to && self.span_end() >= from
    }
}

/// Row stored in the `events` table, without associations
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub requirements: Option<String>,
    pub is_all_day: bool,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for CalendarEvent {
    type Error = AstroClubError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(CalendarEvent {
            id: row.id,
            title: row.title,
            description: row.description,
            event_type: row.event_type.parse()?,
            start: row.start_at,
            end: row.end_at,
            location: row.location,
            requirements: row.requirements,
            is_all_day: row.is_all_day,
            created_by: row.created_by,
            telescopes: Vec::new(),
            team_members: Vec::new(),
            celestial_objects: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventParticipant {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub requirements: Option<String>,
    pub is_all_day: bool,
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<EventType>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub requirements: Option<String>,
    pub is_all_day: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterParticipantRequest {
    pub event_id: i64,
    pub user_id: i64,
    pub status: Option<ParticipantStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Registered,
    Confirmed,
    Cancelled,
    Attended,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Registered => "registered",
            ParticipantStatus::Confirmed => "confirmed",
            ParticipantStatus::Cancelled => "cancelled",
            ParticipantStatus::Attended => "attended",
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_type_round_trips_through_text() {
        for kind in EventType::ALL {
            assert_eq!(kind.as_str().parse::<EventType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_event_type_accepts_kebab_case() {
        assert_eq!("meteor-shower".parse::<EventType>().unwrap(), EventType::MeteorShower);
        assert!("picnic".parse::<EventType>().is_err());
    }

    #[test]
    fn test_club_activities() {
        let club: Vec<EventType> = EventType::ALL.into_iter().filter(EventType::is_club_activity).collect();
        assert_eq!(club, vec![EventType::Meeting, EventType::Workshop]);
    }

    #[test]
    fn test_event_type_serde_name() {
        let json = serde_json::to_string(&EventType::BloodMoon).unwrap();
        assert_eq!(json, "\"BLOOD_MOON\"");
    }

    #[test]
    fn test_overlaps_without_end() {
        let start = Utc.with_ymd_and_hms(2024, 8, 1, 22, 0, 0).unwrap();
        let event = CalendarEvent {
            id: 1,
            title: "Deadline".to_string(),
            description: None,
            event_type: EventType::Meeting,
            start,
            end: None,
            location: None,
            requirements: None,
            is_all_day: false,
            created_by: None,
            telescopes: vec![],
            team_members: vec![],
            celestial_objects: vec![],
        };
        assert!(event.overlaps(start, start));
        assert!(!event.overlaps(start + Duration::seconds(1), start + Duration::hours(1)));
        assert_eq!(event.span_end_or(Duration::minutes(60)), start + Duration::hours(1));
    }
}
