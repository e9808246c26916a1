use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Event, EventPatch, NewEvent, NewRegistration, Registration};
use crate::store::{EventStore, RegistrationStore};
use crate::utils::error::AppError;

const EVENT_COLUMNS: &str =
    "id, title, description, event_date, event_time, location, meeting_point, is_active, created_at";

const REGISTRATION_COLUMNS: &str =
    "id, event_id, rider_name, email, phone, bike_model, registered_at";

pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn create(&self, fields: NewEvent) -> Result<Event, AppError> {
        fields.validate()?;
        let event = Event::new(fields);

        sqlx::query(
            "INSERT INTO events (id, title, description, event_date, event_time, location, meeting_point, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.event_time)
        .bind(&event.location)
        .bind(&event.meeting_point)
        .bind(event.is_active)
        .bind(event.created_at)
        .execute(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update(&self, id: Uuid, patch: EventPatch) -> Result<Event, AppError> {
        patch.validate()?;

        // Fetch-merge-write keeps the merge semantics in one place and off
        // the SQL layer; the system assumes a single logical writer.
        let mut event =
            sqlx::query_as::<_, Event>(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("event {id} does not exist")))?;

        patch.apply(&mut event);

        sqlx::query(
            "UPDATE events
             SET title = $2, description = $3, event_date = $4, event_time = $5,
                 location = $6, meeting_point = $7, is_active = $8
             WHERE id = $1",
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.event_time)
        .bind(&event.location)
        .bind(&event.meeting_point)
        .bind(event.is_active)
        .execute(&self.pool)
        .await?;

        Ok(event)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

pub struct PgRegistrationStore {
    pool: PgPool,
}

impl PgRegistrationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationStore {
    async fn list(&self) -> Result<Vec<Registration>, AppError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations ORDER BY registered_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    async fn create(&self, fields: NewRegistration) -> Result<Registration, AppError> {
        fields.validate()?;
        let registration = Registration::new(fields);

        sqlx::query(
            "INSERT INTO registrations (id, event_id, rider_name, email, phone, bike_model, registered_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(registration.id)
        .bind(registration.event_id)
        .bind(&registration.rider_name)
        .bind(&registration.email)
        .bind(&registration.phone)
        .bind(&registration.bike_model)
        .bind(registration.registered_at)
        .execute(&self.pool)
        .await?;

        Ok(registration)
    }

    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Registration>, AppError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 ORDER BY registered_at DESC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
