use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::protect;
use crate::config::{apply_security_headers, create_cors_layer};
use crate::handlers;
use crate::handlers::{auth, dashboard, events, registrations};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    // Mirrors the admin surface: reads on events and rider signup are
    // public, everything that mutates events or inspects registrations
    // requires an admin session.
    let public = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/events", get(events::list_events))
        .route("/registrations", post(registrations::register))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/events", post(events::create_event))
        .route("/events/:id", put(events::update_event).delete(events::delete_event))
        .route("/registrations", get(registrations::list_registrations))
        .route("/registrations/:id", delete(registrations::delete_registration))
        .route("/dashboard", get(dashboard::dashboard_view))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/check", get(auth::check))
        .route_layer(middleware::from_fn_with_state(state.clone(), protect));

    let router = public.merge(protected);

    apply_security_headers(router)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer()),
        )
        .with_state(state)
}
