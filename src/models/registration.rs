use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    /// May point at an event that no longer exists; aggregations simply skip
    /// registrations that fail to match.
    pub event_id: Uuid,
    pub rider_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bike_model: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(fields: NewRegistration) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id: fields.event_id.id(),
            rider_name: fields.rider_name,
            email: fields.email,
            phone: fields.phone,
            bike_model: fields.bike_model,
            registered_at: Utc::now(),
        }
    }
}

/// An event reference as it arrives on the wire: either a bare id, or an
/// event object some clients embed in place of the id. Normalized to the id
/// before anything is stored or compared.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventRef {
    Id(Uuid),
    Embedded(EmbeddedEvent),
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedEvent {
    #[serde(alias = "_id")]
    pub id: Uuid,
}

impl EventRef {
    pub fn id(&self) -> Uuid {
        match self {
            EventRef::Id(id) => *id,
            EventRef::Embedded(event) => event.id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub event_id: EventRef,
    pub rider_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bike_model: Option<String>,
}

impl NewRegistration {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.rider_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "riderName must not be empty".to_string(),
            ));
        }
        if self.email.trim().is_empty() {
            return Err(AppError::ValidationError("email must not be empty".to_string()));
        }
        Ok(())
    }
}
