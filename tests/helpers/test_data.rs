//! Test data helpers for creating calendar events

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use astroclub::models::{CalendarEvent, CreateEventRequest, EventRef, EventType};

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Builder for test calendar events
pub struct EventBuilder {
    event: CalendarEvent,
}

impl EventBuilder {
    pub fn new(id: i64, title: &str, start: DateTime<Utc>) -> Self {
        Self {
            event: CalendarEvent {
                id,
                title: title.to_string(),
                description: None,
                event_type: EventType::Planetary,
                start,
                end: None,
                location: None,
                requirements: None,
                is_all_day: false,
                created_by: None,
                telescopes: Vec::new(),
                team_members: Vec::new(),
                celestial_objects: Vec::new(),
            },
        }
    }

    pub fn kind(mut self, event_type: EventType) -> Self {
        self.event.event_type = event_type;
        self
    }

    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.event.end = Some(end);
        self
    }

    pub fn all_day(mut self) -> Self {
        self.event.is_all_day = true;
        self
    }

    pub fn telescope(mut self, id: &str, name: &str) -> Self {
        self.event.telescopes.push(EventRef::new(id, name));
        self
    }

    pub fn member(mut self, id: &str, name: &str) -> Self {
        self.event.team_members.push(EventRef::new(id, name));
        self
    }

    pub fn object(mut self, id: &str, name: &str) -> Self {
        self.event.celestial_objects.push(EventRef::new(id, name));
        self
    }

    pub fn build(self) -> CalendarEvent {
        self.event
    }
}

/// A month of club events in August 2024
pub fn august_events() -> Vec<CalendarEvent> {
    vec![
        EventBuilder::new(1, "New Moon", at(2024, 8, 4, 0, 0))
            .kind(EventType::Moon)
            .until(at(2024, 8, 4, 23, 0))
            .build(),
        EventBuilder::new(2, "Jupiter at Opposition", at(2024, 8, 9, 20, 0))
            .until(at(2024, 8, 10, 5, 0))
            .telescope("dob-8", "8\" Dobsonian")
            .object("jupiter", "Jupiter")
            .build(),
        EventBuilder::new(3, "Saturn Observation Night", at(2024, 8, 11, 21, 0))
            .until(at(2024, 8, 11, 23, 0))
            .telescope("refractor-102", "102mm Refractor")
            .member("amina", "Amina")
            .object("saturn", "Saturn")
            .build(),
        EventBuilder::new(4, "Perseid Meteor Shower", at(2024, 8, 12, 0, 0))
            .kind(EventType::MeteorShower)
            .until(at(2024, 8, 13, 0, 0))
            .all_day()
            .build(),
        EventBuilder::new(5, "Club Meeting", at(2024, 8, 12, 18, 0))
            .kind(EventType::Meeting)
            .until(at(2024, 8, 12, 20, 0))
            .member("amina", "Amina")
            .member("yacine", "Yacine")
            .build(),
        EventBuilder::new(6, "Astrophotography Workshop", at(2024, 8, 12, 20, 30))
            .kind(EventType::Workshop)
            .until(at(2024, 8, 12, 22, 0))
            .member("yacine", "Yacine")
            .build(),
        EventBuilder::new(7, "Late Perseid Watch", at(2024, 8, 12, 23, 0))
            .kind(EventType::MeteorShower)
            .until(at(2024, 8, 13, 3, 0))
            .telescope("dob-8", "8\" Dobsonian")
            .build(),
        EventBuilder::new(8, "Full Moon", at(2024, 8, 19, 19, 0))
            .kind(EventType::Moon)
            .until(at(2024, 8, 19, 23, 0))
            .build(),
        EventBuilder::new(9, "Galaxy Photography Deadline", at(2024, 8, 31, 23, 0))
            .kind(EventType::Meeting)
            .build(),
    ]
}

pub fn sample_create_request(title: &str, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        description: Some("Group observation".to_string()),
        event_type: EventType::Planetary,
        start,
        end,
        location: Some("Observatory Hill".to_string()),
        requirements: Some("Clear skies, telescope required".to_string()),
        is_all_day: false,
        created_by: Some(42),
    }
}
