//! Booking repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use aviola_core::error::{AppError, ErrorKind};
use aviola_core::result::AppResult;
use aviola_entity::booking::{Booking, BookingStatus, NewBooking, StatusUpdate};

/// Repository for booking ledger operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new booking in `pending`/`pending` state.
    pub async fn insert(&self, booking: &NewBooking) -> AppResult<Booking> {
        let tickets = serde_json::to_value(&booking.tickets)?;

        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, reference, user_id, event_id, tickets, total_amount_cents) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(booking.id)
        .bind(&booking.reference)
        .bind(booking.user_id)
        .bind(booking.event_id)
        .bind(tickets)
        .bind(booking.total_amount_cents)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert booking", e))
    }

    /// Find a booking by id, scoped to its owning user.
    pub async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// List a user's bookings, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))
    }

    /// Conditionally transition a booking's status.
    ///
    /// The update applies only while the stored `booking_status` still
    /// equals `from`, so concurrent confirm/cancel attempts resolve to
    /// exactly one winner. Returns the updated row, or `None` when the
    /// precondition no longer holds (or the booking does not exist).
    pub async fn transition(
        &self,
        id: Uuid,
        from: BookingStatus,
        update: &StatusUpdate,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET \
                booking_status = COALESCE($3, booking_status), \
                payment_status = COALESCE($4, payment_status), \
                payment_reference = COALESCE($5, payment_reference), \
                updated_at = NOW() \
             WHERE id = $1 AND booking_status = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(update.booking_status)
        .bind(update.payment_status)
        .bind(update.payment_reference.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update booking status", e)
        })
    }

    /// Find pending bookings created before `cutoff`, oldest first.
    pub async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE booking_status = 'pending' AND created_at < $1 \
             ORDER BY created_at ASC",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find stale bookings", e)
        })
    }
}
