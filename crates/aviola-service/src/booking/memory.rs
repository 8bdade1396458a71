//! In-memory booking ledger for single-node deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use aviola_core::error::AppError;
use aviola_core::result::AppResult;
use aviola_entity::booking::{Booking, BookingStatus, NewBooking, PaymentStatus, StatusUpdate};

use super::ledger::BookingLedger;

/// In-memory booking ledger.
///
/// All reads hand out clones taken under the mutex, so a returned
/// booking is a stable snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingLedger {
    /// Bookings keyed by id.
    state: Arc<Mutex<HashMap<Uuid, Booking>>>,
}

impl MemoryBookingLedger {
    /// Creates an empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingLedger for MemoryBookingLedger {
    async fn create_booking(&self, booking: &NewBooking) -> AppResult<Booking> {
        let now = Utc::now();
        let stored = Booking {
            id: booking.id,
            reference: booking.reference.clone(),
            user_id: booking.user_id,
            event_id: booking.event_id,
            tickets: booking.tickets.clone(),
            total_amount_cents: booking.total_amount_cents,
            booking_status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_reference: None,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.lock().await;
        if state.values().any(|b| b.reference == stored.reference) {
            return Err(AppError::conflict(format!(
                "Booking reference '{}' already exists",
                stored.reference
            )));
        }
        state.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Booking>> {
        let state = self.state.lock().await;
        Ok(state
            .get(&id)
            .filter(|b| b.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn transition(
        &self,
        id: Uuid,
        from: BookingStatus,
        update: &StatusUpdate,
    ) -> AppResult<Option<Booking>> {
        let mut state = self.state.lock().await;

        let Some(booking) = state.get_mut(&id) else {
            return Ok(None);
        };
        if booking.booking_status != from {
            return Ok(None);
        }

        if let Some(status) = update.booking_status {
            booking.booking_status = status;
        }
        if let Some(status) = update.payment_status {
            booking.payment_status = status;
        }
        if let Some(ref reference) = update.payment_reference {
            booking.payment_reference = Some(reference.clone());
        }
        booking.updated_at = Utc::now();

        Ok(Some(booking.clone()))
    }

    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut stale: Vec<Booking> = state
            .values()
            .filter(|b| b.booking_status == BookingStatus::Pending && b.created_at < cutoff)
            .cloned()
            .collect();
        stale.sort_by_key(|b| b.created_at);
        Ok(stale)
    }
}
