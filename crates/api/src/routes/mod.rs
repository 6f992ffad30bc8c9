//! HTTP surface
//!
//! Thin handlers: extract the caller, delegate to the core services, map
//! errors through [`ApiError`](crate::error::ApiError).

pub mod analytics;
pub mod appointments;
pub mod auth;
pub mod calls;
pub mod clients;
pub mod health;
pub mod identity;
pub mod users;

use std::sync::Arc;

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::context::AppContext;

/// Build the full application router.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/auth/session", get(auth::session))
        .route("/appointments", get(appointments::list).post(appointments::create))
        .route("/appointments/stats", get(appointments::stats))
        .route("/appointments/{id}/status", post(appointments::update_status))
        .route("/appointments/{id}/reminder", post(appointments::send_reminder))
        .route("/appointments/{id}", delete(appointments::remove))
        .route("/calls", get(calls::list).post(calls::create))
        .route("/calls/stats", get(calls::stats))
        .route("/calls/{id}/status", post(calls::update_status))
        .route("/calls/{id}/transfer", post(calls::transfer))
        .route("/calls/{id}", delete(calls::remove))
        .route("/clients", get(clients::list).post(clients::create))
        .route("/clients/{id}", patch(clients::update))
        .route("/clients/{id}/deactivate", post(clients::deactivate))
        .route("/users", get(users::list))
        .route("/users/{id}/role", post(users::set_role))
        .route("/users/{id}/active", post(users::set_active))
        .route("/analytics", get(analytics::overview))
        .with_state(context)
}
