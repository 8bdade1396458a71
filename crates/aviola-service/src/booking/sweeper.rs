//! Background expiry of stale pending bookings.
//!
//! Bookings left in `pending` past the configured TTL are cancelled and
//! their seats returned to inventory, so abandoned checkouts do not
//! strand capacity.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info};

use aviola_core::config::booking::BookingConfig;
use aviola_core::result::AppResult;

use super::engine::BookingEngine;
use super::ledger::BookingLedger;

/// Periodically expires pending bookings older than the TTL.
#[derive(Debug, Clone)]
pub struct ExpirySweeper {
    ledger: Arc<dyn BookingLedger>,
    engine: BookingEngine,
    config: BookingConfig,
}

impl ExpirySweeper {
    /// Creates a new sweeper.
    pub fn new(ledger: Arc<dyn BookingLedger>, engine: BookingEngine, config: BookingConfig) -> Self {
        Self {
            ledger,
            engine,
            config,
        }
    }

    /// Runs sweep cycles until the shutdown signal fires.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let interval = Duration::from_secs(self.config.sweep_interval_seconds.max(1));
        info!(
            interval_seconds = interval.as_secs(),
            ttl_minutes = self.config.pending_ttl_minutes,
            "Expiry sweeper started"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick fires immediately; consume it so a freshly
        // started server does not sweep before serving.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.run_cycle().await {
                        Ok(0) => debug!("Expiry sweep: nothing to do"),
                        Ok(expired) => info!(expired, "Expiry sweep released stale bookings"),
                        Err(e) => error!(error = %e, "Expiry sweep failed"),
                    }
                }
                _ = shutdown.changed() => {
                    info!("Expiry sweeper stopping");
                    return;
                }
            }
        }
    }

    /// Expires every booking pending longer than the TTL. Returns the
    /// number of bookings actually expired in this cycle.
    pub async fn run_cycle(&self) -> AppResult<usize> {
        let cutoff = Utc::now() - chrono::Duration::minutes(self.config.pending_ttl_minutes as i64);
        let stale = self.ledger.find_stale_pending(cutoff).await?;

        let mut expired = 0;
        for booking in stale {
            // One failed booking must not stop the sweep pass.
            match self.engine.expire_booking(booking.id).await {
                Ok(true) => expired += 1,
                Ok(false) => {
                    debug!(booking_id = %booking.id, "Booking settled before expiry");
                }
                Err(e) => {
                    error!(booking_id = %booking.id, error = %e, "Failed to expire booking");
                }
            }
        }
        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use aviola_entity::booking::BookingStatus;
    use aviola_entity::category::CreateTicketCategory;

    use crate::booking::engine::TicketSelection;
    use crate::booking::memory::MemoryBookingLedger;
    use crate::inventory::memory::MemoryInventoryStore;
    use crate::inventory::InventoryStore;
    use crate::payment::mock::MockPaymentGateway;

    fn sweeper_with_ttl(ttl_minutes: u64) -> (Arc<MemoryInventoryStore>, BookingEngine, ExpirySweeper) {
        let inventory = Arc::new(MemoryInventoryStore::new());
        let ledger = Arc::new(MemoryBookingLedger::new());
        let engine = BookingEngine::new(
            inventory.clone(),
            ledger.clone(),
            Arc::new(MockPaymentGateway::new()),
        );
        let config = BookingConfig {
            pending_ttl_minutes: ttl_minutes,
            ..BookingConfig::default()
        };
        let sweeper = ExpirySweeper::new(ledger, engine.clone(), config);
        (inventory, engine, sweeper)
    }

    #[tokio::test]
    async fn test_cycle_expires_stale_pending_and_releases_seats() {
        let (inventory, engine, sweeper) = sweeper_with_ttl(0);
        let event_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let cat = inventory
            .create_category(&CreateTicketCategory {
                event_id,
                name: "General".to_string(),
                description: String::new(),
                unit_price_cents: 5000,
                total_seats: 5,
            })
            .await
            .unwrap();

        let booking = engine
            .place_booking(
                user_id,
                event_id,
                &[TicketSelection {
                    category_id: cat.id,
                    quantity: 2,
                }],
            )
            .await
            .unwrap();

        // TTL zero: the booking is immediately stale.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert_eq!(sweeper.run_cycle().await.unwrap(), 1);

        let reread = engine.get_booking(booking.id, user_id).await.unwrap();
        assert_eq!(reread.booking_status, BookingStatus::Cancelled);
        let stored = inventory.get_category(cat.id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 5);

        // A second pass finds nothing.
        assert_eq!(sweeper.run_cycle().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cycle_spares_fresh_and_confirmed_bookings() {
        let (inventory, engine, sweeper) = sweeper_with_ttl(30);
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

        let pending = engine
            .place_booking(
                user_id,
                event_id,
                &[TicketSelection {
                    category_id: cat.id,
                    quantity: 1,
                }],
            )
            .await
            .unwrap();
        let paid = engine
            .place_booking(
                user_id,
                event_id,
                &[TicketSelection {
                    category_id: cat.id,
                    quantity: 1,
                }],
            )
            .await
            .unwrap();
        engine.confirm_payment(paid.id, user_id, "card").await.unwrap();

        assert_eq!(sweeper.run_cycle().await.unwrap(), 0);

        let reread = engine.get_booking(pending.id, user_id).await.unwrap();
        assert_eq!(reread.booking_status, BookingStatus::Pending);
        let stored = inventory.get_category(cat.id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 3);
    }
}
