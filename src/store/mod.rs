use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Event, EventPatch, NewEvent, NewRegistration, Registration};
use crate::utils::error::AppError;

pub mod memory;
pub mod postgres;

/// Persistence boundary for events. Backends validate inputs, assign ids and
/// creation timestamps, and never cascade deletes into registrations.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Event>, AppError>;

    async fn create(&self, fields: NewEvent) -> Result<Event, AppError>;

    /// Shallow-merges the patch onto the stored record. `NotFound` when the
    /// id does not exist.
    async fn update(&self, id: Uuid, patch: EventPatch) -> Result<Event, AppError>;

    /// Idempotent: deleting an absent id still succeeds.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Registration>, AppError>;

    async fn create(&self, fields: NewRegistration) -> Result<Registration, AppError>;

    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Registration>, AppError>;

    /// Idempotent, same policy as event deletion.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
