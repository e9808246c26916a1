//! Admin sessions: opaque bearer tokens issued at login and checked by the
//! `protect` middleware on every mutating route.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::state::AppState;
use crate::utils::error::AppError;

/// The validated token of the session making the current request, inserted
/// by `protect` for handlers that need it (logout).
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

#[derive(Clone, Default)]
pub struct AdminSessions {
    tokens: Arc<Mutex<HashSet<String>>>,
}

impl AdminSessions {
    pub fn issue(&self) -> Result<String, AppError> {
        let token = hex::encode(rand::thread_rng().gen::<[u8; 32]>());
        self.lock()?.insert(token.clone());
        Ok(token)
    }

    pub fn is_valid(&self, token: &str) -> Result<bool, AppError> {
        Ok(self.lock()?.contains(token))
    }

    /// Revoking an unknown token is a no-op, so logout is idempotent.
    pub fn revoke(&self, token: &str) -> Result<(), AppError> {
        self.lock()?.remove(token);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashSet<String>>, AppError> {
        self.tokens
            .lock()
            .map_err(|_| AppError::InternalServerError("session store lock poisoned".to_string()))
    }
}

pub async fn protect(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::AuthError("missing bearer token".to_string()))?;

    if !state.sessions.is_valid(&token)? {
        return Err(AppError::AuthError("invalid or expired session".to_string()));
    }

    request.extensions_mut().insert(SessionToken(token));
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn issued_tokens_validate_until_revoked() {
        let sessions = AdminSessions::default();
        let token = sessions.issue().unwrap();

        assert!(sessions.is_valid(&token).unwrap());
        sessions.revoke(&token).unwrap();
        assert!(!sessions.is_valid(&token).unwrap());
        // Revoking again is fine.
        sessions.revoke(&token).unwrap();
    }

    #[test]
    fn tokens_are_unique() {
        let sessions = AdminSessions::default();
        assert_ne!(sessions.issue().unwrap(), sessions.issue().unwrap());
    }

    #[test]
    fn bearer_token_requires_scheme_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);
    }
}
