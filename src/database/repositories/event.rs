//! Event repository implementation

use std::collections::HashMap;
use std::time::Instant;
use sqlx::{FromRow, PgConnection, PgPool};
use chrono::{DateTime, Utc};
use crate::models::event::{
    CalendarEvent, EventRef, EventRow, EventParticipant, CreateEventRequest, UpdateEventRequest,
    RegisterParticipantRequest, ParticipantStatus,
};
use crate::utils::errors::AstroClubError;
use crate::utils::logging::log_database_operation;

const EVENT_COLUMNS: &str =
    "id, title, description, event_type, start_at, end_at, location, requirements, is_all_day, created_by, created_at, updated_at";

/// Association lists stored next to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Association {
    Telescope,
    TeamMember,
    CelestialObject,
}

impl Association {
    fn table(&self) -> &'static str {
        match self {
            Association::Telescope => "event_telescopes",
            Association::TeamMember => "event_team_members",
            Association::CelestialObject => "event_celestial_objects",
        }
    }
}

#[derive(Debug, FromRow)]
struct AssociationRow {
    event_id: i64,
    id: String,
    name: String,
}

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<CalendarEvent, AstroClubError> {
        let mut conn = self.pool.acquire().await?;
        let row = insert_event(&mut conn, request).await?;
        CalendarEvent::try_from(row)
    }

    /// Create an event and its association links in one transaction
    ///
    /// Nothing is stored when any link fails.
    pub async fn create_with_associations(
        &self,
        request: CreateEventRequest,
        links: &[(Association, &[EventRef])],
    ) -> Result<CalendarEvent, AstroClubError> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;

        let row = insert_event(&mut tx, request).await?;
        for (association, references) in links {
            for reference in references.iter() {
                insert_association(&mut tx, *association, row.id, reference).await?;
            }
        }
        let event_id = row.id;
        tx.commit().await?;

        log_database_operation("create_with_associations", "events", started.elapsed().as_millis() as u64, true);
        self.find_by_id(event_id)
            .await?
            .ok_or(AstroClubError::EventNotFound { event_id })
    }

    /// Find event by ID, associations included
    pub async fn find_by_id(&self, id: i64) -> Result<Option<CalendarEvent>, AstroClubError> {
        let row = sqlx::query_as::<_, EventRow>(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let mut events = self.with_associations(vec![row]).await?;
                Ok(events.pop())
            }
            None => Ok(None),
        }
    }

    /// Update event; `None` fields keep their stored value
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<CalendarEvent, AstroClubError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_type = COALESCE($4, event_type),
                start_at = COALESCE($5, start_at),
                end_at = COALESCE($6, end_at),
                location = COALESCE($7, location),
                requirements = COALESCE($8, requirements),
                is_all_day = COALESCE($9, is_all_day),
                updated_at = $10
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_type.map(|kind| kind.as_str()))
        .bind(request.start)
        .bind(request.end)
        .bind(request.location)
        .bind(request.requirements)
        .bind(request.is_all_day)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AstroClubError::EventNotFound { event_id: id })?;

        let mut events = self.with_associations(vec![row]).await?;
        events.pop().ok_or(AstroClubError::EventNotFound { event_id: id })
    }

    /// Delete event; associations and participants cascade
    pub async fn delete(&self, id: i64) -> Result<(), AstroClubError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AstroClubError::EventNotFound { event_id: id });
        }
        Ok(())
    }

    /// Events whose span overlaps `[from, to]`, ordered by start
    pub async fn list_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<CalendarEvent>, AstroClubError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE start_at <= $2 AND COALESCE(end_at, start_at) >= $1 ORDER BY start_at ASC, id ASC"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await;

        log_database_operation("list_between", "events", started.elapsed().as_millis() as u64, rows.is_ok());
        self.with_associations(rows?).await
    }

    /// Link a telescope, team member or celestial object to an event
    pub async fn attach(&self, association: Association, event_id: i64, reference: &EventRef) -> Result<(), AstroClubError> {
        let mut conn = self.pool.acquire().await?;
        insert_association(&mut conn, association, event_id, reference).await
    }

    pub async fn detach(&self, association: Association, event_id: i64, ref_id: &str) -> Result<(), AstroClubError> {
        sqlx::query(&format!("DELETE FROM {} WHERE event_id = $1 AND ref_id = $2", association.table()))
            .bind(event_id)
            .bind(ref_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Register participant for event
    pub async fn register_participant(&self, request: RegisterParticipantRequest) -> Result<EventParticipant, AstroClubError> {
        let status = request.status.unwrap_or(ParticipantStatus::Registered);
        let participant = sqlx::query_as::<_, EventParticipant>(
            r#"
            INSERT INTO event_participants (event_id, user_id, status, registered_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, user_id, status, registered_at
            "#
        )
        .bind(request.event_id)
        .bind(request.user_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Get event participants
    pub async fn get_participants(&self, event_id: i64) -> Result<Vec<EventParticipant>, AstroClubError> {
        let participants = sqlx::query_as::<_, EventParticipant>(
            "SELECT id, event_id, user_id, status, registered_at FROM event_participants WHERE event_id = $1 ORDER BY registered_at ASC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    /// Check if user is registered for event
    pub async fn is_registered(&self, event_id: i64, user_id: i64) -> Result<bool, AstroClubError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_participants WHERE event_id = $1 AND user_id = $2"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, AstroClubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn load_associations(&self, association: Association, ids: &[i64]) -> Result<HashMap<i64, Vec<EventRef>>, AstroClubError> {
        let rows = sqlx::query_as::<_, AssociationRow>(&format!(
            "SELECT event_id, ref_id AS id, name FROM {} WHERE event_id = ANY($1) ORDER BY event_id, ref_id",
            association.table()
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<EventRef>> = HashMap::new();
        for row in rows {
            grouped.entry(row.event_id).or_default().push(EventRef { id: row.id, name: row.name });
        }
        Ok(grouped)
    }

    async fn with_associations(&self, rows: Vec<EventRow>) -> Result<Vec<CalendarEvent>, AstroClubError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut telescopes = self.load_associations(Association::Telescope, &ids).await?;
        let mut members = self.load_associations(Association::TeamMember, &ids).await?;
        let mut objects = self.load_associations(Association::CelestialObject, &ids).await?;

        rows.into_iter()
            .map(|row| {
                let mut event = CalendarEvent::try_from(row)?;
                event.telescopes = telescopes.remove(&event.id).unwrap_or_default();
                event.team_members = members.remove(&event.id).unwrap_or_default();
                event.celestial_objects = objects.remove(&event.id).unwrap_or_default();
                Ok(event)
            })
            .collect()
    }
}

async fn insert_event(conn: &mut PgConnection, request: CreateEventRequest) -> Result<EventRow, AstroClubError> {
    let row = sqlx::query_as::<_, EventRow>(&format!(
        r#"
        INSERT INTO events (title, description, event_type, start_at, end_at, location, requirements, is_all_day, created_by, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING {EVENT_COLUMNS}
        "#
    ))
    .bind(request.title)
    .bind(request.description)
    .bind(request.event_type.as_str())
    .bind(request.start)
    .bind(request.end)
    .bind(request.location)
    .bind(request.requirements)
    .bind(request.is_all_day)
    .bind(request.created_by)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}

async fn insert_association(
    conn: &mut PgConnection,
    association: Association,
    event_id: i64,
    reference: &EventRef,
) -> Result<(), AstroClubError> {
    sqlx::query(&format!(
        "INSERT INTO {} (event_id, ref_id, name) VALUES ($1, $2, $3) ON CONFLICT (event_id, ref_id) DO UPDATE SET name = EXCLUDED.name",
        association.table()
    ))
    .bind(event_id)
    .bind(&reference.id)
    .bind(&reference.name)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
