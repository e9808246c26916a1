use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::error::AppError;

/// A club ride. `event_date` is a plain calendar date: every "is this
/// upcoming" comparison works on dates with no time-of-day component, while
/// `event_time` is display text shown to riders and never compared.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub meeting_point: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Assigns the id and creation timestamp; both are immutable afterwards.
    pub fn new(fields: NewEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            event_date: fields.event_date,
            event_time: fields.event_time,
            location: fields.location,
            meeting_point: fields.meeting_point,
            is_active: fields.is_active,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    #[serde(default)]
    pub meeting_point: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl NewEvent {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::ValidationError("title must not be empty".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(AppError::ValidationError("location must not be empty".to_string()));
        }
        if self.event_time.trim().is_empty() {
            return Err(AppError::ValidationError("eventTime must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Partial update. Provided fields overwrite the stored record; `id` and
/// `created_at` are never touched. `meeting_point` distinguishes an omitted
/// key (leave as is) from an explicit null (clear the field).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub meeting_point: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// Present-but-null deserializes to `Some(None)`; an absent key stays `None`
/// via the field's `default`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

impl EventPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            return Err(AppError::ValidationError("title must not be empty".to_string()));
        }
        if matches!(&self.location, Some(l) if l.trim().is_empty()) {
            return Err(AppError::ValidationError("location must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(event_date) = self.event_date {
            event.event_date = event_date;
        }
        if let Some(event_time) = self.event_time {
            event.event_time = event_time;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(meeting_point) = self.meeting_point {
            event.meeting_point = meeting_point;
        }
        if let Some(is_active) = self.is_active {
            event.is_active = is_active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_event() -> NewEvent {
        NewEvent {
            title: "Coastal Run".to_string(),
            description: "Sunrise ride along the coast road".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            event_time: "06:30 AM".to_string(),
            location: "Harbour Gate".to_string(),
            meeting_point: Some("Fuel station, pier exit".to_string()),
            is_active: true,
        }
    }

    #[test]
    fn new_assigns_id_and_created_at() {
        let a = Event::new(new_event());
        let b = Event::new(new_event());
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "Coastal Run");
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut fields = new_event();
        fields.title = "   ".to_string();
        assert!(matches!(
            fields.validate(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn patch_overwrites_only_provided_fields() {
        let mut event = Event::new(new_event());
        let created_at = event.created_at;
        let patch = EventPatch {
            title: Some("Coastal Run II".to_string()),
            is_active: Some(false),
            ..EventPatch::default()
        };
        patch.apply(&mut event);
        assert_eq!(event.title, "Coastal Run II");
        assert!(!event.is_active);
        assert_eq!(event.location, "Harbour Gate");
        assert_eq!(event.created_at, created_at);
    }

    #[test]
    fn patch_null_clears_meeting_point_but_absent_keeps_it() {
        let mut event = Event::new(new_event());

        let absent: EventPatch = serde_json::from_str(r#"{"title": "Renamed"}"#).unwrap();
        absent.apply(&mut event);
        assert_eq!(
            event.meeting_point.as_deref(),
            Some("Fuel station, pier exit")
        );

        let replaced: EventPatch =
            serde_json::from_str(r#"{"meetingPoint": "North gate"}"#).unwrap();
        replaced.apply(&mut event);
        assert_eq!(event.meeting_point.as_deref(), Some("North gate"));

        let cleared: EventPatch = serde_json::from_str(r#"{"meetingPoint": null}"#).unwrap();
        cleared.apply(&mut event);
        assert_eq!(event.meeting_point, None);
    }

    #[test]
    fn patch_parses_camel_case_wire_names() {
        let patch: EventPatch =
            serde_json::from_str(r#"{"eventDate": "2026-10-01", "isActive": false}"#).unwrap();
        assert_eq!(
            patch.event_date,
            Some(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap())
        );
        assert_eq!(patch.is_active, Some(false));
        assert!(patch.title.is_none());
    }
}
