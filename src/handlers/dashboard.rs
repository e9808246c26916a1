use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;

use crate::dashboard::compute_dashboard_view;
use crate::selection::EventSelection;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

#[derive(Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub selection: EventSelection,
}

pub async fn dashboard_view(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, AppError> {
    let today = Utc::now().date_naive();

    let view = compute_dashboard_view(
        state.events.as_ref(),
        state.registrations.as_ref(),
        today,
        query.selection,
        state.config.store_timeout,
    )
    .await?;

    Ok(success(view, "Dashboard view computed").into_response())
}
