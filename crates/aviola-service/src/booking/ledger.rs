//! Booking ledger trait: the durable record of bookings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use aviola_core::result::AppResult;
use aviola_entity::booking::{Booking, BookingStatus, NewBooking, StatusUpdate};

/// Durable record of bookings and their status.
///
/// Status changes go through [`transition`], a conditional update that
/// applies only while the stored booking status still equals the
/// expected `from` value. Concurrent confirm/cancel attempts therefore
/// resolve to exactly one winner.
///
/// [`transition`]: BookingLedger::transition
#[async_trait]
pub trait BookingLedger: Send + Sync + std::fmt::Debug {
    /// Persist a new booking in `pending`/`pending` state.
    async fn create_booking(&self, booking: &NewBooking) -> AppResult<Booking>;

    /// Load a booking, visible only to its owning user.
    async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Booking>>;

    /// List a user's bookings, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>>;

    /// Conditionally apply a status update. Returns the updated booking,
    /// or `None` when the booking is missing or no longer in `from`.
    async fn transition(
        &self,
        id: Uuid,
        from: BookingStatus,
        update: &StatusUpdate,
    ) -> AppResult<Option<Booking>>;

    /// Find pending bookings created before `cutoff`, oldest first.
    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Booking>>;
}
