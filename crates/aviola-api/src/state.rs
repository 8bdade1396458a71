//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use aviola_core::config::AppConfig;
use aviola_service::booking::BookingEngine;
use aviola_service::event::EventCatalog;
use aviola_service::inventory::InventoryStore;

use crate::auth::JwtVerifier;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Event catalog.
    pub events: Arc<dyn EventCatalog>,
    /// Seat inventory.
    pub inventory: Arc<dyn InventoryStore>,
    /// Booking transaction engine.
    pub engine: BookingEngine,
    /// Access token verifier.
    pub jwt: Arc<JwtVerifier>,
    /// Database pool, absent when running on the in-memory stores.
    /// Used by the health endpoint for a connectivity probe.
    pub db: Option<PgPool>,
}
