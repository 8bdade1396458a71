//! Booking transaction engine.
//!
//! Orchestrates reservation, pricing, and commit/rollback across the
//! inventory store and the booking ledger. A multi-category request is
//! all-or-nothing: seats reserved for earlier items are released in
//! reverse order whenever a later step fails, including a failed ledger
//! write after every reservation succeeded.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use aviola_core::error::AppError;
use aviola_core::result::AppResult;
use aviola_entity::booking::{
    Booking, BookingLineItem, BookingStatus, NewBooking, PaymentStatus, StatusUpdate,
};
use aviola_entity::category::ReserveOutcome;

use crate::inventory::InventoryStore;
use crate::payment::{Confirmation, PaymentGateway};

use super::ledger::BookingLedger;
use super::reference::booking_reference;

/// One requested line of a booking, as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSelection {
    /// The ticket category to book.
    pub category_id: Uuid,
    /// Number of seats requested.
    pub quantity: i32,
}

/// The booking transaction engine.
///
/// Invoked by independent concurrent request handlers; all mutual
/// exclusion lives inside the inventory store's atomic operations and
/// the ledger's conditional transitions.
#[derive(Debug, Clone)]
pub struct BookingEngine {
    /// Seat inventory.
    inventory: Arc<dyn InventoryStore>,
    /// Booking ledger.
    ledger: Arc<dyn BookingLedger>,
    /// Payment collaborator.
    gateway: Arc<dyn PaymentGateway>,
}

impl BookingEngine {
    /// Creates a new booking engine.
    pub fn new(
        inventory: Arc<dyn InventoryStore>,
        ledger: Arc<dyn BookingLedger>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            inventory,
            ledger,
            gateway,
        }
    }

    /// Place a booking for the requested ticket quantities.
    ///
    /// Items are processed in caller order. On success the returned
    /// booking is `pending`/`pending` with every line item's price
    /// snapshotted at reservation time. On any failure the caller
    /// observes an all-or-nothing outcome: no seats from this request
    /// remain reserved.
    pub async fn place_booking(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        items: &[TicketSelection],
    ) -> AppResult<Booking> {
        if items.is_empty() {
            return Err(AppError::validation("Booking must contain at least one ticket"));
        }
        if items.iter().any(|item| item.quantity <= 0) {
            return Err(AppError::validation("Ticket quantity must be positive"));
        }

        // Seats reserved so far in this request, released in reverse on
        // any later failure.
        let mut reserved: Vec<(Uuid, i32)> = Vec::with_capacity(items.len());
        let mut line_items: Vec<BookingLineItem> = Vec::with_capacity(items.len());
        let mut total_amount_cents: i64 = 0;

        for item in items {
            let category = match self.inventory.get_category(item.category_id).await {
                Ok(Some(category)) => category,
                Ok(None) => {
                    return Err(self
                        .abort_placement(
                            &reserved,
                            AppError::not_found("Ticket category not found"),
                        )
                        .await);
                }
                Err(e) => return Err(self.abort_placement(&reserved, e).await),
            };

            if category.event_id != event_id {
                return Err(self
                    .abort_placement(
                        &reserved,
                        AppError::validation(format!(
                            "Ticket category '{}' does not belong to this event",
                            category.name
                        )),
                    )
                    .await);
            }

            match self
                .inventory
                .reserve_seats(item.category_id, item.quantity)
                .await
            {
                Ok(ReserveOutcome::Reserved) => {
                    reserved.push((item.category_id, item.quantity));
                }
                Ok(ReserveOutcome::Insufficient) => {
                    return Err(self
                        .abort_placement(&reserved, AppError::insufficient_seats(&category.name))
                        .await);
                }
                Ok(ReserveOutcome::NotFound) => {
                    return Err(self
                        .abort_placement(
                            &reserved,
                            AppError::not_found("Ticket category not found"),
                        )
                        .await);
                }
                Err(e) => return Err(self.abort_placement(&reserved, e).await),
            }

            // Snapshot the price as read in this request; later repricing
            // never touches this booking.
            let line = BookingLineItem {
                category_id: category.id,
                quantity: item.quantity,
                unit_price_cents: category.unit_price_cents,
            };
            total_amount_cents += line.subtotal_cents();
            line_items.push(line);
        }

        let new_booking = NewBooking {
            id: Uuid::new_v4(),
            reference: booking_reference(),
            user_id,
            event_id,
            tickets: line_items,
            total_amount_cents,
        };

        // Commit point. A ledger failure here means the client holds no
        // booking, so the reserved seats must go back.
        let booking = match self.ledger.create_booking(&new_booking).await {
            Ok(booking) => booking,
            Err(e) => return Err(self.abort_placement(&reserved, e).await),
        };

        info!(
            booking_id = %booking.id,
            reference = %booking.reference,
            user_id = %user_id,
            total_amount_cents = booking.total_amount_cents,
            "Booking placed"
        );
        Ok(booking)
    }

    /// Confirm payment for a pending booking.
    ///
    /// A declined charge leaves the booking pending with its seats held
    /// so payment can be retried. No seat counts change here: seats
    /// were committed at placement time.
    pub async fn confirm_payment(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        method: &str,
    ) -> AppResult<Booking> {
        let booking = self
            .ledger
            .get_for_user(booking_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if !booking.is_pending() {
            return Err(AppError::conflict(format!(
                "Booking is {} and can no longer be paid",
                booking.booking_status
            )));
        }

        let reference = match self
            .gateway
            .confirm(booking.id, booking.total_amount_cents, method)
            .await?
        {
            Confirmation::Approved { reference } => reference,
            Confirmation::Declined { reason } => {
                warn!(booking_id = %booking.id, reason = %reason, "Payment declined");
                return Err(AppError::payment_declined(reason));
            }
        };

        let update = StatusUpdate {
            booking_status: Some(BookingStatus::Confirmed),
            payment_status: Some(PaymentStatus::Paid),
            payment_reference: Some(reference),
        };

        // Conditional on still being pending: a concurrent confirmation
        // or cancellation wins the race and this call reports the
        // conflict instead of double-recording the payment.
        let confirmed = self
            .ledger
            .transition(booking.id, BookingStatus::Pending, &update)
            .await?
            .ok_or_else(|| {
                AppError::conflict("Booking is no longer pending and can no longer be paid")
            })?;

        info!(
            booking_id = %confirmed.id,
            reference = %confirmed.reference,
            "Booking confirmed"
        );
        Ok(confirmed)
    }

    /// Cancel a booking and release its seats back to inventory.
    ///
    /// The cancellation is claimed first through a conditional status
    /// transition so concurrent cancels release seats exactly once. A
    /// paid booking is marked refunded, an unpaid one failed.
    pub async fn cancel_booking(&self, booking_id: Uuid, user_id: Uuid) -> AppResult<Booking> {
        let booking = self
            .ledger
            .get_for_user(booking_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if booking.booking_status == BookingStatus::Cancelled {
            return Err(AppError::conflict("Booking is already cancelled"));
        }

        let payment_status = if booking.payment_status == PaymentStatus::Paid {
            PaymentStatus::Refunded
        } else {
            PaymentStatus::Failed
        };
        let update = StatusUpdate {
            booking_status: Some(BookingStatus::Cancelled),
            payment_status: Some(payment_status),
            payment_reference: None,
        };

        let cancelled = self
            .ledger
            .transition(booking.id, booking.booking_status, &update)
            .await?
            .ok_or_else(|| AppError::conflict("Booking was modified concurrently"))?;

        self.release_line_items(&cancelled).await?;

        info!(
            booking_id = %cancelled.id,
            reference = %cancelled.reference,
            payment_status = %payment_status,
            "Booking cancelled"
        );
        Ok(cancelled)
    }

    /// Expire a stale pending booking, releasing its seats.
    ///
    /// Used by the expiry sweeper. Returns `false` when the booking was
    /// confirmed or cancelled in the meantime (nothing to do).
    pub async fn expire_booking(&self, booking_id: Uuid) -> AppResult<bool> {
        let update = StatusUpdate {
            booking_status: Some(BookingStatus::Cancelled),
            payment_status: Some(PaymentStatus::Failed),
            payment_reference: None,
        };

        let Some(expired) = self
            .ledger
            .transition(booking_id, BookingStatus::Pending, &update)
            .await?
        else {
            return Ok(false);
        };

        self.release_line_items(&expired).await?;

        info!(
            booking_id = %expired.id,
            reference = %expired.reference,
            "Pending booking expired"
        );
        Ok(true)
    }

    /// Load a booking, visible only to its owning user.
    pub async fn get_booking(&self, booking_id: Uuid, user_id: Uuid) -> AppResult<Booking> {
        self.ledger
            .get_for_user(booking_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))
    }

    /// List a user's bookings, newest first.
    pub async fn list_bookings_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        self.ledger.list_for_user(user_id).await
    }

    /// Compensate a failed placement: release every seat reserved so far
    /// in this request, in reverse order.
    ///
    /// Returns the error the caller should surface — the original
    /// failure, or `CompensationFailed` when a release itself failed and
    /// inventory may now be inconsistent.
    async fn abort_placement(&self, reserved: &[(Uuid, i32)], cause: AppError) -> AppError {
        if !reserved.is_empty() {
            warn!(
                reserved_items = reserved.len(),
                cause = %cause,
                "Booking aborted after partial reservation, compensating"
            );
        }

        for &(category_id, quantity) in reserved.iter().rev() {
            match self.inventory.release_seats(category_id, quantity).await {
                Ok(_) => {}
                Err(e) => {
                    error!(
                        category_id = %category_id,
                        quantity = quantity,
                        error = %e,
                        "Failed to release reserved seats during compensation"
                    );
                    return AppError::compensation_failed(format!(
                        "Failed to release {quantity} reserved seat(s) after aborted booking: {e}"
                    ));
                }
            }
        }

        cause
    }

    /// Release every line item of a cancelled or expired booking.
    async fn release_line_items(&self, booking: &Booking) -> AppResult<()> {
        for item in &booking.tickets {
            if let Err(e) = self
                .inventory
                .release_seats(item.category_id, item.quantity)
                .await
            {
                error!(
                    booking_id = %booking.id,
                    category_id = %item.category_id,
                    error = %e,
                    "Failed to release seats for cancelled booking"
                );
                return Err(AppError::compensation_failed(format!(
                    "Booking {} was cancelled but releasing its seats failed: {e}",
                    booking.reference
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviola_core::error::ErrorKind;
    use aviola_entity::category::{CreateTicketCategory, TicketCategory};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use crate::booking::memory::MemoryBookingLedger;
    use crate::inventory::memory::MemoryInventoryStore;
    use crate::payment::mock::MockPaymentGateway;

    /// Gateway that refuses every charge.
    #[derive(Debug, Default)]
    struct DecliningGateway;

    #[async_trait]
    impl PaymentGateway for DecliningGateway {
        async fn confirm(
            &self,
            _booking_id: Uuid,
            _amount_cents: i64,
            _method: &str,
        ) -> AppResult<Confirmation> {
            Ok(Confirmation::Declined {
                reason: "card refused".to_string(),
            })
        }
    }

    /// Inventory store whose seat releases always fail, for the
    /// compensation-failure paths.
    #[derive(Debug)]
    struct BrokenReleaseStore {
        inner: MemoryInventoryStore,
    }

    impl BrokenReleaseStore {
        fn new() -> Self {
            Self {
                inner: MemoryInventoryStore::new(),
            }
        }
    }

    #[async_trait]
    impl InventoryStore for BrokenReleaseStore {
        async fn create_category(
            &self,
            category: &CreateTicketCategory,
        ) -> AppResult<TicketCategory> {
            self.inner.create_category(category).await
        }

        async fn get_category(&self, id: Uuid) -> AppResult<Option<TicketCategory>> {
            self.inner.get_category(id).await
        }

        async fn list_for_event(&self, event_id: Uuid) -> AppResult<Vec<TicketCategory>> {
            self.inner.list_for_event(event_id).await
        }

        async fn update_price(&self, id: Uuid, unit_price_cents: i64) -> AppResult<bool> {
            self.inner.update_price(id, unit_price_cents).await
        }

        async fn reserve_seats(&self, id: Uuid, quantity: i32) -> AppResult<ReserveOutcome> {
            self.inner.reserve_seats(id, quantity).await
        }

        async fn release_seats(&self, _id: Uuid, _quantity: i32) -> AppResult<bool> {
            Err(AppError::database("connection lost"))
        }
    }

    /// Ledger whose writes always fail, for the commit-failure path.
    #[derive(Debug, Default)]
    struct FailingLedger;

    #[async_trait]
    impl BookingLedger for FailingLedger {
        async fn create_booking(&self, _booking: &NewBooking) -> AppResult<Booking> {
            Err(AppError::database("connection lost"))
        }

        async fn get_for_user(&self, _id: Uuid, _user_id: Uuid) -> AppResult<Option<Booking>> {
            Ok(None)
        }

        async fn list_for_user(&self, _user_id: Uuid) -> AppResult<Vec<Booking>> {
            Ok(Vec::new())
        }

        async fn transition(
            &self,
            _id: Uuid,
            _from: BookingStatus,
            _update: &StatusUpdate,
        ) -> AppResult<Option<Booking>> {
            Err(AppError::database("connection lost"))
        }

        async fn find_stale_pending(&self, _cutoff: DateTime<Utc>) -> AppResult<Vec<Booking>> {
            Ok(Vec::new())
        }
    }

    struct Fixture {
        inventory: Arc<MemoryInventoryStore>,
        engine: BookingEngine,
        event_id: Uuid,
        user_id: Uuid,
    }

    fn fixture() -> Fixture {
        let inventory = Arc::new(MemoryInventoryStore::new());
        let engine = BookingEngine::new(
            inventory.clone(),
            Arc::new(MemoryBookingLedger::new()),
            Arc::new(MockPaymentGateway::new()),
        );
        Fixture {
            inventory,
            engine,
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        }
    }

    async fn add_category(
        fx: &Fixture,
        name: &str,
        price_cents: i64,
        total_seats: i32,
    ) -> TicketCategory {
        fx.inventory
            .create_category(&CreateTicketCategory {
                event_id: fx.event_id,
                name: name.to_string(),
                description: String::new(),
                unit_price_cents: price_cents,
                total_seats,
            })
            .await
            .unwrap()
    }

    async fn available(fx: &Fixture, id: Uuid) -> i32 {
        fx.inventory
            .get_category(id)
            .await
            .unwrap()
            .unwrap()
            .available_seats
    }

    fn select(category_id: Uuid, quantity: i32) -> TicketSelection {
        TicketSelection {
            category_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_place_booking_snapshots_prices_and_holds_seats() {
        let fx = fixture();
        let vip = add_category(&fx, "VIP", 15000, 10).await;
        let general = add_category(&fx, "General", 5000, 100).await;

        let booking = fx
            .engine
            .place_booking(
                fx.user_id,
                fx.event_id,
                &[select(vip.id, 2), select(general.id, 3)],
            )
            .await
            .unwrap();

        assert!(booking.reference.starts_with("AV"));
        assert_eq!(booking.booking_status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert_eq!(booking.total_amount_cents, 2 * 15000 + 3 * 5000);
        assert_eq!(booking.line_total_cents(), booking.total_amount_cents);
        assert_eq!(available(&fx, vip.id).await, 8);
        assert_eq!(available(&fx, general.id).await, 97);
    }

    #[tokio::test]
    async fn test_place_booking_rejects_invalid_requests() {
        let fx = fixture();
        let vip = add_category(&fx, "VIP", 15000, 10).await;

        let err = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[select(vip.id, 0)])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        // Neither attempt may touch the pool.
        assert_eq!(available(&fx, vip.id).await, 10);
    }

    #[tokio::test]
    async fn test_place_booking_unknown_category() {
        let fx = fixture();
        let err = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[select(Uuid::new_v4(), 1)])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_place_booking_rejects_category_from_other_event() {
        let fx = fixture();
        let vip = add_category(&fx, "VIP", 15000, 10).await;
        let other = fx
            .inventory
            .create_category(&CreateTicketCategory {
                event_id: Uuid::new_v4(),
                name: "Other".to_string(),
                description: String::new(),
                unit_price_cents: 1000,
                total_seats: 5,
            })
            .await
            .unwrap();

        let err = fx
            .engine
            .place_booking(
                fx.user_id,
                fx.event_id,
                &[select(vip.id, 1), select(other.id, 1)],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        // The VIP seat reserved before the mismatch was released.
        assert_eq!(available(&fx, vip.id).await, 10);
    }

    #[tokio::test]
    async fn test_multi_item_booking_is_all_or_nothing() {
        let fx = fixture();
        let a = add_category(&fx, "A", 2000, 2).await;
        let b = add_category(&fx, "B", 3000, 1).await;

        // Drain B so the second line fails.
        fx.engine
            .place_booking(fx.user_id, fx.event_id, &[select(b.id, 1)])
            .await
            .unwrap();

        let err = fx
            .engine
            .place_booking(
                fx.user_id,
                fx.event_id,
                &[select(a.id, 1), select(b.id, 1)],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InsufficientSeats);
        assert!(err.message.contains("B"));

        // No seat leakage from the failed attempt.
        assert_eq!(available(&fx, a.id).await, 2);
        assert_eq!(available(&fx, b.id).await, 0);
    }

    #[tokio::test]
    async fn test_ledger_failure_releases_reserved_seats() {
        let inventory = Arc::new(MemoryInventoryStore::new());
        let engine = BookingEngine::new(
            inventory.clone(),
            Arc::new(FailingLedger),
            Arc::new(MockPaymentGateway::new()),
        );
        let event_id = Uuid::new_v4();
        let cat = inventory
            .create_category(&CreateTicketCategory {
                event_id,
                name: "VIP".to_string(),
                description: String::new(),
                unit_price_cents: 15000,
                total_seats: 5,
            })
            .await
            .unwrap();

        let err = engine
            .place_booking(Uuid::new_v4(), event_id, &[select(cat.id, 2)])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);

        let stored = inventory.get_category(cat.id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 5);
    }

    #[tokio::test]
    async fn test_failed_release_during_abort_surfaces_compensation_failure() {
        let inventory = Arc::new(BrokenReleaseStore::new());
        let engine = BookingEngine::new(
            inventory.clone(),
            Arc::new(MemoryBookingLedger::new()),
            Arc::new(MockPaymentGateway::new()),
        );
        let event_id = Uuid::new_v4();
        let a = inventory
            .create_category(&CreateTicketCategory {
                event_id,
                name: "A".to_string(),
                description: String::new(),
                unit_price_cents: 2000,
                total_seats: 5,
            })
            .await
            .unwrap();
        let b = inventory
            .create_category(&CreateTicketCategory {
                event_id,
                name: "B".to_string(),
                description: String::new(),
                unit_price_cents: 3000,
                total_seats: 1,
            })
            .await
            .unwrap();
        // Drain B so the second line of the booking fails after A was
        // reserved, forcing the release path.
        inventory.reserve_seats(b.id, 1).await.unwrap();

        let err = engine
            .place_booking(
                Uuid::new_v4(),
                event_id,
                &[select(a.id, 2), select(b.id, 1)],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::CompensationFailed);
    }

    #[tokio::test]
    async fn test_failed_release_during_cancel_surfaces_compensation_failure() {
        let inventory = Arc::new(BrokenReleaseStore::new());
        let ledger = Arc::new(MemoryBookingLedger::new());
        let engine = BookingEngine::new(
            inventory.clone(),
            ledger.clone(),
            Arc::new(MockPaymentGateway::new()),
        );
        let event_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let cat = inventory
            .create_category(&CreateTicketCategory {
                event_id,
                name: "VIP".to_string(),
                description: String::new(),
                unit_price_cents: 15000,
                total_seats: 5,
            })
            .await
            .unwrap();

        let booking = engine
            .place_booking(user_id, event_id, &[select(cat.id, 2)])
            .await
            .unwrap();

        let err = engine
            .cancel_booking(booking.id, user_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::CompensationFailed);

        // The cancellation was already claimed; only the seat credit is
        // in doubt and flagged for the operator.
        let reread = engine.get_booking(booking.id, user_id).await.unwrap();
        assert_eq!(reread.booking_status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_concurrent_bookings_for_last_seat() {
        let fx = fixture();
        let vip = add_category(&fx, "VIP", 15000, 1).await;

        let engine1 = fx.engine.clone();
        let engine2 = fx.engine.clone();
        let event_id = fx.event_id;
        let items = vec![select(vip.id, 1)];
        let items2 = items.clone();

        let (first, second) = tokio::join!(
            tokio::spawn(async move {
                engine1.place_booking(Uuid::new_v4(), event_id, &items).await
            }),
            tokio::spawn(async move {
                engine2
                    .place_booking(Uuid::new_v4(), event_id, &items2)
                    .await
            }),
        );
        let results = [first.unwrap(), second.unwrap()];

        let winners: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
        assert_eq!(winners.len(), 1, "exactly one booking must win the last seat");
        assert_eq!(
            winners[0].as_ref().unwrap().total_amount_cents,
            15000
        );
        let loser = results.iter().find(|r| r.is_err()).unwrap();
        assert_eq!(
            loser.as_ref().unwrap_err().kind,
            ErrorKind::InsufficientSeats
        );

        // Never negative, never oversold.
        assert_eq!(available(&fx, vip.id).await, 0);
    }

    #[tokio::test]
    async fn test_no_oversell_across_many_concurrent_requests() {
        let fx = fixture();
        let cat = add_category(&fx, "General", 5000, 5).await;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let engine = fx.engine.clone();
            let event_id = fx.event_id;
            let category_id = cat.id;
            handles.push(tokio::spawn(async move {
                engine
                    .place_booking(Uuid::new_v4(), event_id, &[select(category_id, 1)])
                    .await
            }));
        }

        let mut booked = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                booked += 1;
            }
        }

        assert_eq!(booked, 5);
        assert_eq!(available(&fx, cat.id).await, 0);
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_repricing() {
        let fx = fixture();
        let cat = add_category(&fx, "General", 7500, 10).await;

        let booking = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[select(cat.id, 1)])
            .await
            .unwrap();

        assert!(fx.inventory.update_price(cat.id, 10000).await.unwrap());

        let reread = fx
            .engine
            .get_booking(booking.id, fx.user_id)
            .await
            .unwrap();
        assert_eq!(reread.tickets[0].unit_price_cents, 7500);
        assert_eq!(reread.total_amount_cents, 7500);

        // Idempotent read: no intervening mutation, identical data.
        let again = fx
            .engine
            .get_booking(booking.id, fx.user_id)
            .await
            .unwrap();
        assert_eq!(again.tickets, reread.tickets);
        assert_eq!(again.updated_at, reread.updated_at);
    }

    #[tokio::test]
    async fn test_confirm_payment_is_terminal_safe() {
        let fx = fixture();
        let cat = add_category(&fx, "VIP", 15000, 2).await;
        let booking = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[select(cat.id, 1)])
            .await
            .unwrap();

        let confirmed = fx
            .engine
            .confirm_payment(booking.id, fx.user_id, "card")
            .await
            .unwrap();
        assert_eq!(confirmed.booking_status, BookingStatus::Confirmed);
        assert_eq!(confirmed.payment_status, PaymentStatus::Paid);
        let reference = confirmed.payment_reference.clone().unwrap();
        assert!(reference.starts_with("pay_"));

        // Seats were committed at placement; confirmation changes none.
        assert_eq!(available(&fx, cat.id).await, 1);

        // Second confirmation fails without minting a new reference.
        let err = fx
            .engine
            .confirm_payment(booking.id, fx.user_id, "card")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        let reread = fx.engine.get_booking(booking.id, fx.user_id).await.unwrap();
        assert_eq!(reread.payment_reference.unwrap(), reference);
    }

    #[tokio::test]
    async fn test_confirm_payment_scoped_to_owner() {
        let fx = fixture();
        let cat = add_category(&fx, "VIP", 15000, 2).await;
        let booking = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[select(cat.id, 1)])
            .await
            .unwrap();

        let err = fx
            .engine
            .confirm_payment(booking.id, Uuid::new_v4(), "card")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_declined_payment_keeps_booking_pending_and_seats_held() {
        let inventory = Arc::new(MemoryInventoryStore::new());
        let ledger = Arc::new(MemoryBookingLedger::new());
        let engine = BookingEngine::new(
            inventory.clone(),
            ledger.clone(),
            Arc::new(DecliningGateway),
        );
        let event_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let cat = inventory
            .create_category(&CreateTicketCategory {
                event_id,
                name: "VIP".to_string(),
                description: String::new(),
                unit_price_cents: 15000,
                total_seats: 3,
            })
            .await
            .unwrap();

        let booking = engine
            .place_booking(user_id, event_id, &[select(cat.id, 2)])
            .await
            .unwrap();

        let err = engine
            .confirm_payment(booking.id, user_id, "card")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::PaymentDeclined);

        // Still pending (retry possible), seats still held.
        let reread = engine.get_booking(booking.id, user_id).await.unwrap();
        assert_eq!(reread.booking_status, BookingStatus::Pending);
        assert!(reread.payment_reference.is_none());
        let stored = inventory.get_category(cat.id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 1);
    }

    #[tokio::test]
    async fn test_cancel_pending_booking_releases_seats() {
        let fx = fixture();
        let cat = add_category(&fx, "VIP", 15000, 4).await;
        let booking = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[select(cat.id, 3)])
            .await
            .unwrap();
        assert_eq!(available(&fx, cat.id).await, 1);

        let cancelled = fx
            .engine
            .cancel_booking(booking.id, fx.user_id)
            .await
            .unwrap();
        assert_eq!(cancelled.booking_status, BookingStatus::Cancelled);
        assert_eq!(cancelled.payment_status, PaymentStatus::Failed);
        assert_eq!(available(&fx, cat.id).await, 4);

        // Cancelling twice is a conflict, and seats are not re-credited.
        let err = fx
            .engine
            .cancel_booking(booking.id, fx.user_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(available(&fx, cat.id).await, 4);
    }

    #[tokio::test]
    async fn test_cancel_confirmed_booking_marks_refund() {
        let fx = fixture();
        let cat = add_category(&fx, "VIP", 15000, 2).await;
        let booking = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[select(cat.id, 1)])
            .await
            .unwrap();
        fx.engine
            .confirm_payment(booking.id, fx.user_id, "card")
            .await
            .unwrap();

        let cancelled = fx
            .engine
            .cancel_booking(booking.id, fx.user_id)
            .await
            .unwrap();
        assert_eq!(cancelled.booking_status, BookingStatus::Cancelled);
        assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);
        assert_eq!(available(&fx, cat.id).await, 2);
    }

    #[tokio::test]
    async fn test_list_bookings_newest_first_and_owner_scoped() {
        let fx = fixture();
        let cat = add_category(&fx, "General", 5000, 10).await;

        let first = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[select(cat.id, 1)])
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = fx
            .engine
            .place_booking(fx.user_id, fx.event_id, &[select(cat.id, 1)])
            .await
            .unwrap();
        fx.engine
            .place_booking(Uuid::new_v4(), fx.event_id, &[select(cat.id, 1)])
            .await
            .unwrap();

        let bookings = fx.engine.list_bookings_for_user(fx.user_id).await.unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].id, second.id);
        assert_eq!(bookings[1].id, first.id);
    }
}
