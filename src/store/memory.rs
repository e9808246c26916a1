use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::models::{Event, EventPatch, NewEvent, NewRegistration, Registration};
use crate::store::{EventStore, RegistrationStore};
use crate::utils::error::AppError;

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::InternalServerError(format!("{what} store lock poisoned")))
}

/// In-process event store. Backs tests and the `STORE_BACKEND=memory` demo
/// mode; nothing survives a restart.
#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<Event>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a handful of rides around `today` so the dashboard has
    /// something to show: upcoming events plus a couple of past ones that
    /// must never surface as "current".
    pub fn with_sample_events(today: NaiveDate) -> Self {
        let sample = |title: &str, date: NaiveDate, time: &str, location: &str| {
            Event::new(NewEvent {
                title: title.to_string(),
                description: format!("{title} organized by the club"),
                event_date: date,
                event_time: time.to_string(),
                location: location.to_string(),
                meeting_point: None,
                is_active: true,
            })
        };

        let events = vec![
            sample(
                "Mountain Ride",
                today + Days::new(7),
                "06:00 AM",
                "Mountain View Point",
            ),
            sample(
                "Weekend Highway Cruise",
                today + Days::new(14),
                "07:00 AM",
                "Expressway Toll Plaza",
            ),
            sample("City Night Ride", today + Days::new(30), "08:00 PM", "City Center"),
            sample("Monsoon Trail Ride", today - Days::new(30), "06:30 AM", "Ghat Road"),
            sample("Coastal Highway Run", today - Days::new(90), "05:30 AM", "Coast Road"),
        ];

        Self {
            events: Mutex::new(events),
        }
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list(&self) -> Result<Vec<Event>, AppError> {
        Ok(lock(&self.events, "event")?.clone())
    }

    async fn create(&self, fields: NewEvent) -> Result<Event, AppError> {
        fields.validate()?;
        let event = Event::new(fields);
        lock(&self.events, "event")?.push(event.clone());
        Ok(event)
    }

    async fn update(&self, id: Uuid, patch: EventPatch) -> Result<Event, AppError> {
        patch.validate()?;
        let mut events = lock(&self.events, "event")?;
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("event {id} does not exist")))?;
        patch.apply(event);
        Ok(event.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        lock(&self.events, "event")?.retain(|e| e.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRegistrationStore {
    registrations: Mutex<Vec<Registration>>,
}

impl MemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationStore for MemoryRegistrationStore {
    async fn list(&self) -> Result<Vec<Registration>, AppError> {
        Ok(lock(&self.registrations, "registration")?.clone())
    }

    async fn create(&self, fields: NewRegistration) -> Result<Registration, AppError> {
        fields.validate()?;
        let registration = Registration::new(fields);
        lock(&self.registrations, "registration")?.push(registration.clone());
        Ok(registration)
    }

    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Registration>, AppError> {
        Ok(lock(&self.registrations, "registration")?
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        lock(&self.registrations, "registration")?.retain(|r| r.id != id);
        Ok(())
    }
}
