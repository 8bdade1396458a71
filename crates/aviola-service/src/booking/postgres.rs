//! PostgreSQL-backed booking ledger.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use aviola_core::result::AppResult;
use aviola_database::repositories::booking::BookingRepository;
use aviola_entity::booking::{Booking, BookingStatus, NewBooking, StatusUpdate};

use super::ledger::BookingLedger;

/// Booking ledger backed by the `bookings` table.
#[derive(Debug, Clone)]
pub struct PgBookingLedger {
    repo: Arc<BookingRepository>,
}

impl PgBookingLedger {
    /// Creates a new Postgres-backed booking ledger.
    pub fn new(repo: Arc<BookingRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl BookingLedger for PgBookingLedger {
    async fn create_booking(&self, booking: &NewBooking) -> AppResult<Booking> {
        self.repo.insert(booking).await
    }

    async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Booking>> {
        self.repo.find_by_id_for_user(id, user_id).await
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        self.repo.find_by_user(user_id).await
    }

    async fn transition(
        &self,
        id: Uuid,
        from: BookingStatus,
        update: &StatusUpdate,
    ) -> AppResult<Option<Booking>> {
        self.repo.transition(id, from, update).await
    }

    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Booking>> {
        self.repo.find_stale_pending(cutoff).await
    }
}
