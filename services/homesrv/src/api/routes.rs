//! API routes configuration

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::*;
use crate::AppState;

/// Create API routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/ping", get(ping))
        .route("/api/status", get(get_status))
        // Emergency alerts
        .route(
            "/api/alerts",
            get(list_alerts).post(create_alert).delete(clear_alerts),
        )
        .route("/api/alerts/{id}", delete(dismiss_alert))
        .route(
            "/api/notifications",
            get(list_notifications).delete(clear_notifications),
        )
        .route("/api/notifications/{id}", delete(dismiss_notification))
        .route("/api/simulation", post(start_simulation))
        // Property lookup
        .route("/api/attom/property", post(attom_lookup))
        // Showcase dataset
        .route("/api/mock/data", get(get_mock_data))
        .route("/api/mock/user/{user_id}", get(get_mock_user))
        .route("/api/mock/user", post(create_mock_user))
        .route("/api/mock/home", post(create_mock_home))
        .route("/api/mock/login", post(mock_login))
        // Accounts
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/check-username/{username}", get(check_username))
        .route("/api/profile/home", post(create_home))
        .route("/api/profile/user/{user_id}", get(get_user_profile))
        // Local session
        .route("/api/session", get(get_session))
        .route(
            "/api/session/profile",
            post(save_profile).delete(clear_profile),
        )
        .route("/api/session/login", post(session_login))
        .route("/api/session/logout", post(session_logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
