use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::models::{EventPatch, NewEvent};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.events.list().await?;
    Ok(success(events, "Events retrieved").into_response())
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(fields): Json<NewEvent>,
) -> Result<Response, AppError> {
    let event = state.events.create(fields).await?;
    tracing::info!(event_id = %event.id, title = %event.title, "Event created");
    Ok(created(event, "Event created").into_response())
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<EventPatch>,
) -> Result<Response, AppError> {
    let event = state.events.update(id, patch).await?;
    Ok(success(event, "Event updated").into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.events.delete(id).await?;
    Ok(empty_success("Event deleted").into_response())
}
