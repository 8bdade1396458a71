//! Application builder — wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use aviola_core::config::AppConfig;
use aviola_database::repositories::booking::BookingRepository;
use aviola_database::repositories::category::TicketCategoryRepository;
use aviola_database::repositories::event::EventRepository;
use aviola_service::booking::{
    BookingEngine, BookingLedger, MemoryBookingLedger, PgBookingLedger,
};
use aviola_service::event::{MemoryEventCatalog, PgEventCatalog};
use aviola_service::inventory::{MemoryInventoryStore, PgInventoryStore};
use aviola_service::payment::mock::MockPaymentGateway;

use crate::auth::JwtVerifier;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds application state backed by PostgreSQL.
///
/// Returns the state together with the ledger handle the expiry sweeper
/// polls for stale bookings.
pub fn build_postgres_state(
    config: AppConfig,
    pool: PgPool,
) -> (AppState, Arc<dyn BookingLedger>) {
    let events = Arc::new(PgEventCatalog::new(Arc::new(EventRepository::new(
        pool.clone(),
    ))));
    let inventory = Arc::new(PgInventoryStore::new(Arc::new(
        TicketCategoryRepository::new(pool.clone()),
    )));
    let ledger: Arc<dyn BookingLedger> = Arc::new(PgBookingLedger::new(Arc::new(
        BookingRepository::new(pool.clone()),
    )));

    let engine = BookingEngine::new(
        inventory.clone(),
        ledger.clone(),
        Arc::new(MockPaymentGateway::new()),
    );
    let jwt = Arc::new(JwtVerifier::new(&config.auth));

    let state = AppState {
        config: Arc::new(config),
        events,
        inventory,
        engine,
        jwt,
        db: Some(pool),
    };
    (state, ledger)
}

/// Builds application state backed by in-memory stores.
///
/// Used by the test suite and for running without a database.
pub fn build_memory_state(config: AppConfig) -> (AppState, Arc<dyn BookingLedger>) {
    let events = Arc::new(MemoryEventCatalog::new());
    let inventory = Arc::new(MemoryInventoryStore::new());
    let ledger: Arc<dyn BookingLedger> = Arc::new(MemoryBookingLedger::new());

    let engine = BookingEngine::new(
        inventory.clone(),
        ledger.clone(),
        Arc::new(MockPaymentGateway::new()),
    );
    let jwt = Arc::new(JwtVerifier::new(&config.auth));

    let state = AppState {
        config: Arc::new(config),
        events,
        inventory,
        engine,
        jwt,
        db: None,
    };
    (state, ledger)
}
