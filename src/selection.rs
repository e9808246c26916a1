//! Active-event selection: pure functions deciding which event the dashboard
//! shows. No clock access here; callers pass "today" in.

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::Event;

/// Wire sentinel meaning "track the nearest upcoming event".
pub const CURRENT_SENTINEL: &str = "current";

/// The dashboard's selection state: tracking the nearest upcoming event, or
/// pinned to one the admin chose from the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSelection {
    #[default]
    Current,
    Pinned(Uuid),
}

impl<'de> Deserialize<'de> for EventSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw == CURRENT_SENTINEL {
            return Ok(EventSelection::Current);
        }
        Uuid::parse_str(&raw)
            .map(EventSelection::Pinned)
            .map_err(|_| de::Error::custom(format!("expected \"current\" or an event id, got {raw:?}")))
    }
}

/// Events that are active and dated today or later, ascending by date. The
/// sort is stable, so events sharing a date keep their incoming order.
pub fn upcoming_active(events: Vec<Event>, today: NaiveDate) -> Vec<Event> {
    let mut upcoming: Vec<Event> = events
        .into_iter()
        .filter(|event| event.is_active && event.event_date >= today)
        .collect();
    upcoming.sort_by_key(|event| event.event_date);
    upcoming
}

/// Resolves the selection against an already filtered-and-sorted upcoming
/// list. A pinned id that is no longer upcoming falls back to the current
/// event; an empty list resolves to nothing for every selection.
pub fn resolve_target(upcoming: &[Event], selection: EventSelection) -> Option<&Event> {
    let current = upcoming.first();
    match selection {
        EventSelection::Current => current,
        EventSelection::Pinned(id) => upcoming.iter().find(|event| event.id == id).or(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewEvent;
    use chrono::Days;

    fn event(title: &str, event_date: NaiveDate, is_active: bool) -> Event {
        Event::new(NewEvent {
            title: title.to_string(),
            description: String::new(),
            event_date,
            event_time: "09:00 AM".to_string(),
            location: "Clubhouse".to_string(),
            meeting_point: None,
            is_active,
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
    }

    #[test]
    fn filters_past_events_and_sorts_ascending() {
        let t = today();
        let events = vec![
            event("Future", t + Days::new(5), true),
            event("Yesterday", t - Days::new(1), true),
            event("Today", t, true),
        ];

        let upcoming = upcoming_active(events, t);
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Today", "Future"]);

        let current = resolve_target(&upcoming, EventSelection::Current).unwrap();
        assert_eq!(current.title, "Today");
    }

    #[test]
    fn inactive_events_never_surface() {
        let t = today();
        let events = vec![
            event("Hidden", t + Days::new(1), false),
            event("Visible", t + Days::new(2), true),
        ];

        let upcoming = upcoming_active(events, t);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "Visible");
    }

    #[test]
    fn empty_upcoming_resolves_to_none_for_any_selection() {
        let upcoming = upcoming_active(vec![], today());
        assert!(upcoming.is_empty());
        assert!(resolve_target(&upcoming, EventSelection::Current).is_none());
        assert!(resolve_target(&upcoming, EventSelection::Pinned(Uuid::new_v4())).is_none());
    }

    #[test]
    fn pinned_selection_targets_that_event() {
        let t = today();
        let events = vec![
            event("First", t + Days::new(1), true),
            event("Second", t + Days::new(2), true),
        ];
        let upcoming = upcoming_active(events, t);
        let second_id = upcoming[1].id;

        let target = resolve_target(&upcoming, EventSelection::Pinned(second_id)).unwrap();
        assert_eq!(target.title, "Second");
    }

    #[test]
    fn pinned_unknown_id_falls_back_to_current() {
        let t = today();
        let upcoming = upcoming_active(vec![event("Only", t, true)], t);

        let target = resolve_target(&upcoming, EventSelection::Pinned(Uuid::new_v4())).unwrap();
        assert_eq!(target.title, "Only");
    }

    #[test]
    fn equal_dates_keep_incoming_order() {
        let t = today();
        let same_day = t + Days::new(3);
        let events = vec![
            event("Alpha", same_day, true),
            event("Later", t + Days::new(9), true),
            event("Bravo", same_day, true),
        ];

        let upcoming = upcoming_active(events, t);
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "Bravo", "Later"]);
    }

    #[test]
    fn selection_parses_sentinel_and_ids() {
        let current: EventSelection = serde_json::from_str("\"current\"").unwrap();
        assert_eq!(current, EventSelection::Current);

        let id = Uuid::new_v4();
        let pinned: EventSelection = serde_json::from_str(&format!("\"{id}\"")).unwrap();
        assert_eq!(pinned, EventSelection::Pinned(id));

        assert!(serde_json::from_str::<EventSelection>("\"not-an-id\"").is_err());
    }
}
