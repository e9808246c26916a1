//! Dashboard aggregation: joins the two stores through the selector into the
//! view model the admin UI renders.

use chrono::NaiveDate;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

use crate::models::Event;
use crate::selection::{self, EventSelection};
use crate::store::{EventStore, RegistrationStore};
use crate::utils::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub upcoming_events: Vec<Event>,
    pub active_event: Option<Event>,
    pub registered_count: usize,
}

/// Fetches events and registrations concurrently, resolves the target event,
/// and counts the registrations referencing it. Registrations pointing at a
/// deleted event simply never match and are left out of the count.
///
/// Any fetch error or timeout surfaces as `LoadFailure`; no partial view is
/// ever produced.
pub async fn compute_dashboard_view(
    events: &dyn EventStore,
    registrations: &dyn RegistrationStore,
    today: NaiveDate,
    selection: EventSelection,
    store_timeout: Duration,
) -> Result<DashboardView, AppError> {
    let (all_events, all_registrations) = tokio::try_join!(
        fetch(store_timeout, "events", events.list()),
        fetch(store_timeout, "registrations", registrations.list()),
    )?;

    let upcoming = selection::upcoming_active(all_events, today);
    let target = selection::resolve_target(&upcoming, selection).cloned();

    let registered_count = match &target {
        Some(event) => all_registrations
            .iter()
            .filter(|r| r.event_id == event.id)
            .count(),
        None => 0,
    };

    Ok(DashboardView {
        upcoming_events: upcoming,
        active_event: target,
        registered_count,
    })
}

async fn fetch<T, F>(limit: Duration, what: &str, future: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(AppError::LoadFailure(format!("failed to load {what}: {err}"))),
        Err(_) => Err(AppError::LoadFailure(format!("loading {what} timed out"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventRef, NewEvent, NewRegistration, Registration};
    use crate::store::memory::{MemoryEventStore, MemoryRegistrationStore};
    use async_trait::async_trait;
    use chrono::{Days, NaiveDate};
    use uuid::Uuid;

    const TIMEOUT: Duration = Duration::from_secs(1);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
    }

    fn new_event(title: &str, event_date: NaiveDate) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: String::new(),
            event_date,
            event_time: "09:00 AM".to_string(),
            location: "Clubhouse".to_string(),
            meeting_point: None,
            is_active: true,
        }
    }

    fn registration_for(event_id: Uuid, rider: &str) -> NewRegistration {
        NewRegistration {
            event_id: EventRef::Id(event_id),
            rider_name: rider.to_string(),
            email: format!("{}@example.com", rider.to_lowercase()),
            phone: None,
            bike_model: None,
        }
    }

    #[tokio::test]
    async fn counts_registrations_for_current_event() {
        let events = MemoryEventStore::new();
        let registrations = MemoryRegistrationStore::new();

        let near = events.create(new_event("Near", today() + Days::new(1))).await.unwrap();
        let far = events.create(new_event("Far", today() + Days::new(9))).await.unwrap();

        registrations.create(registration_for(near.id, "Asha")).await.unwrap();
        registrations.create(registration_for(near.id, "Ravi")).await.unwrap();
        registrations.create(registration_for(far.id, "Mina")).await.unwrap();

        let view = compute_dashboard_view(
            &events,
            &registrations,
            today(),
            EventSelection::Current,
            TIMEOUT,
        )
        .await
        .unwrap();

        assert_eq!(view.upcoming_events.len(), 2);
        assert_eq!(view.active_event.as_ref().unwrap().id, near.id);
        assert_eq!(view.registered_count, 2);
    }

    #[tokio::test]
    async fn pinned_selection_counts_that_event() {
        let events = MemoryEventStore::new();
        let registrations = MemoryRegistrationStore::new();

        let near = events.create(new_event("Near", today() + Days::new(1))).await.unwrap();
        let far = events.create(new_event("Far", today() + Days::new(9))).await.unwrap();

        registrations.create(registration_for(near.id, "Asha")).await.unwrap();
        registrations.create(registration_for(far.id, "Mina")).await.unwrap();

        let view = compute_dashboard_view(
            &events,
            &registrations,
            today(),
            EventSelection::Pinned(far.id),
            TIMEOUT,
        )
        .await
        .unwrap();

        assert_eq!(view.active_event.as_ref().unwrap().id, far.id);
        assert_eq!(view.registered_count, 1);
    }

    #[tokio::test]
    async fn orphaned_registrations_are_excluded_without_crashing() {
        let events = MemoryEventStore::new();
        let registrations = MemoryRegistrationStore::new();

        let ride = events.create(new_event("Ride", today() + Days::new(2))).await.unwrap();
        registrations.create(registration_for(ride.id, "Asha")).await.unwrap();
        // Points at an event that was deleted after signup.
        registrations
            .create(registration_for(Uuid::new_v4(), "Ghost"))
            .await
            .unwrap();

        let view = compute_dashboard_view(
            &events,
            &registrations,
            today(),
            EventSelection::Current,
            TIMEOUT,
        )
        .await
        .unwrap();

        assert_eq!(view.registered_count, 1);
    }

    #[tokio::test]
    async fn no_upcoming_events_means_no_target_and_zero_count() {
        let events = MemoryEventStore::new();
        let registrations = MemoryRegistrationStore::new();

        events.create(new_event("Past", today() - Days::new(1))).await.unwrap();

        let view = compute_dashboard_view(
            &events,
            &registrations,
            today(),
            EventSelection::Current,
            TIMEOUT,
        )
        .await
        .unwrap();

        assert!(view.upcoming_events.is_empty());
        assert!(view.active_event.is_none());
        assert_eq!(view.registered_count, 0);
    }

    struct FailingEventStore;

    #[async_trait]
    impl crate::store::EventStore for FailingEventStore {
        async fn list(&self) -> Result<Vec<Event>, AppError> {
            Err(AppError::InternalServerError("backend unreachable".to_string()))
        }
        async fn create(&self, _: NewEvent) -> Result<Event, AppError> {
            unreachable!()
        }
        async fn update(&self, _: Uuid, _: crate::models::EventPatch) -> Result<Event, AppError> {
            unreachable!()
        }
        async fn delete(&self, _: Uuid) -> Result<(), AppError> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_load_failure() {
        let registrations = MemoryRegistrationStore::new();
        let err = compute_dashboard_view(
            &FailingEventStore,
            &registrations,
            today(),
            EventSelection::Current,
            TIMEOUT,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::LoadFailure(_)));
    }

    struct StalledRegistrationStore;

    #[async_trait]
    impl crate::store::RegistrationStore for StalledRegistrationStore {
        async fn list(&self) -> Result<Vec<Registration>, AppError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }
        async fn create(&self, _: NewRegistration) -> Result<Registration, AppError> {
            unreachable!()
        }
        async fn list_by_event(&self, _: Uuid) -> Result<Vec<Registration>, AppError> {
            unreachable!()
        }
        async fn delete(&self, _: Uuid) -> Result<(), AppError> {
            unreachable!()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hung_store_times_out_as_load_failure() {
        let events = MemoryEventStore::new();
        let err = compute_dashboard_view(
            &events,
            &StalledRegistrationStore,
            today(),
            EventSelection::Current,
            Duration::from_millis(50),
        )
        .await
        .unwrap_err();

        match err {
            AppError::LoadFailure(msg) => assert!(msg.contains("timed out")),
            other => panic!("expected LoadFailure, got {other:?}"),
        }
    }
}
