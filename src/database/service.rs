//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{Association, DatabasePool, EventRepository};
use crate::models::*;
use crate::utils::errors::AstroClubError;
use crate::utils::logging::log_event_action;

#[derive(Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
}

/// Associations to link when scheduling an event
#[derive(Debug, Clone, Default)]
pub struct EventAssociations {
    pub telescopes: Vec<EventRef>,
    pub team_members: Vec<EventRef>,
    pub celestial_objects: Vec<EventRef>,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool),
        }
    }

    /// Create an event and link its telescopes, team members and celestial objects
    pub async fn schedule_event(&self, request: CreateEventRequest, associations: EventAssociations) -> Result<CalendarEvent, AstroClubError> {
        if request.title.trim().is_empty() {
            return Err(AstroClubError::InvalidInput("Event title is required".to_string()));
        }
        if request.end.is_some_and(|end| end < request.start) {
            return Err(AstroClubError::InvalidInput("Event cannot end before it starts".to_string()));
        }

        let created_by = request.created_by;
        let links = [
            (Association::Telescope, associations.telescopes.as_slice()),
            (Association::TeamMember, associations.team_members.as_slice()),
            (Association::CelestialObject, associations.celestial_objects.as_slice()),
        ];
        let event = self.events.create_with_associations(request, &links).await?;

        log_event_action(event.id, "scheduled", created_by, Some(event.event_type.as_str()));
        Ok(event)
    }

    /// Update an event, keeping its span ordered
    ///
    /// Fields left as `None` keep their stored value, so an end time can be
    /// moved but not removed.
    pub async fn update_event(&self, event_id: i64, request: UpdateEventRequest) -> Result<CalendarEvent, AstroClubError> {
        let current = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AstroClubError::EventNotFound { event_id })?;

        if request.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(AstroClubError::InvalidInput("Event title is required".to_string()));
        }
        let start = request.start.unwrap_or(current.start);
        if request.end.or(current.end).is_some_and(|end| end < start) {
            return Err(AstroClubError::InvalidInput("Event cannot end before it starts".to_string()));
        }

        let event = self.events.update(event_id, request).await?;
        log_event_action(event_id, "updated", None, None);
        Ok(event)
    }

    /// Register user for event
    pub async fn register_for_event(&self, event_id: i64, user_id: i64) -> Result<EventParticipant, AstroClubError> {
        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(AstroClubError::EventNotFound { event_id });
        }

        if self.events.is_registered(event_id, user_id).await? {
            return Err(AstroClubError::InvalidInput("User is already registered for this event".to_string()));
        }

        let request = RegisterParticipantRequest {
            event_id,
            user_id,
            status: Some(ParticipantStatus::Registered),
        };

        let participant = self.events.register_participant(request).await?;
        log_event_action(event_id, "participant_registered", Some(user_id), None);
        Ok(participant)
    }
}
