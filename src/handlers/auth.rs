use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::SessionToken;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{empty_success, success};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
struct LoginPayload {
    token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    if request.password != state.config.admin_password {
        return Err(AppError::AuthError("invalid credentials".to_string()));
    }

    let token = state.sessions.issue()?;
    tracing::info!("Admin session issued");
    Ok(success(LoginPayload { token }, "Login successful").into_response())
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Response, AppError> {
    state.sessions.revoke(&token)?;
    Ok(empty_success("Logged out").into_response())
}

/// Reachable only behind `protect`; arriving here means the session holds.
pub async fn check() -> Response {
    empty_success("Session is valid").into_response()
}
