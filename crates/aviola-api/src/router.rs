//! Route definitions for the Aviola HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(event_routes())
        .merge(booking_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Public event browsing.
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(handlers::event::list_events))
        .route("/events/{id}", get(handlers::event::get_event))
}

/// Booking lifecycle (authenticated).
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(handlers::booking::create_booking))
        .route(
            "/bookings/my-bookings",
            get(handlers::booking::my_bookings),
        )
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/payment",
            post(handlers::booking::confirm_payment),
        )
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
}

/// Event management (admin role).
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/events", post(handlers::admin::create_event))
        .route(
            "/admin/categories/{id}/price",
            put(handlers::admin::update_price),
        )
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
