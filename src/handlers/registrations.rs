use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::NewRegistration;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationQuery {
    #[serde(default)]
    pub event_id: Option<Uuid>,
}

pub async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<RegistrationQuery>,
) -> Result<Response, AppError> {
    let registrations = match query.event_id {
        Some(event_id) => state.registrations.list_by_event(event_id).await?,
        None => state.registrations.list().await?,
    };
    Ok(success(registrations, "Registrations retrieved").into_response())
}

pub async fn register(
    State(state): State<AppState>,
    Json(fields): Json<NewRegistration>,
) -> Result<Response, AppError> {
    let registration = state.registrations.create(fields).await?;
    tracing::info!(
        registration_id = %registration.id,
        event_id = %registration.event_id,
        "Rider registered"
    );
    Ok(created(registration, "Registration created").into_response())
}

pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.registrations.delete(id).await?;
    Ok(empty_success("Registration deleted").into_response())
}
