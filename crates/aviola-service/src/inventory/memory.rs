//! In-memory inventory store using a Tokio mutex for single-node
//! deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use aviola_core::result::AppResult;
use aviola_entity::category::{CreateTicketCategory, ReserveOutcome, TicketCategory};

use super::InventoryStore;

/// In-memory inventory store.
///
/// The reserve check-and-decrement happens under a single mutex hold,
/// which gives it the same atomicity guarantee the Postgres store gets
/// from its conditional `UPDATE`.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventoryStore {
    /// Categories keyed by id.
    state: Arc<Mutex<HashMap<Uuid, TicketCategory>>>,
}

impl MemoryInventoryStore {
    /// Creates an empty in-memory inventory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn create_category(
        &self,
        category: &CreateTicketCategory,
    ) -> AppResult<TicketCategory> {
        let now = Utc::now();
        let stored = TicketCategory {
            id: Uuid::new_v4(),
            event_id: category.event_id,
            name: category.name.clone(),
            description: category.description.clone(),
            unit_price_cents: category.unit_price_cents,
            total_seats: category.total_seats,
            available_seats: category.total_seats,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.lock().await;
        state.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_category(&self, id: Uuid) -> AppResult<Option<TicketCategory>> {
        let state = self.state.lock().await;
        Ok(state.get(&id).cloned())
    }

    async fn list_for_event(&self, event_id: Uuid) -> AppResult<Vec<TicketCategory>> {
        let state = self.state.lock().await;
        let mut categories: Vec<TicketCategory> = state
            .values()
            .filter(|c| c.event_id == event_id)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.unit_price_cents);
        Ok(categories)
    }

    async fn update_price(&self, id: Uuid, unit_price_cents: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.get_mut(&id) {
            Some(category) => {
                category.unit_price_cents = unit_price_cents;
                category.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reserve_seats(&self, id: Uuid, quantity: i32) -> AppResult<ReserveOutcome> {
        let mut state = self.state.lock().await;

        let Some(category) = state.get_mut(&id) else {
            return Ok(ReserveOutcome::NotFound);
        };

        if category.available_seats < quantity {
            return Ok(ReserveOutcome::Insufficient);
        }

        category.available_seats -= quantity;
        category.updated_at = Utc::now();
        info!(
            category = %category.name,
            quantity = quantity,
            remaining = category.available_seats,
            "Seats reserved"
        );

        Ok(ReserveOutcome::Reserved)
    }

    async fn release_seats(&self, id: Uuid, quantity: i32) -> AppResult<bool> {
        let mut state = self.state.lock().await;

        let Some(category) = state.get_mut(&id) else {
            return Ok(false);
        };

        category.available_seats =
            (category.available_seats.saturating_add(quantity)).min(category.total_seats);
        category.updated_at = Utc::now();
        info!(
            category = %category.name,
            quantity = quantity,
            remaining = category.available_seats,
            "Seats released"
        );

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vip(event_id: Uuid) -> CreateTicketCategory {
        CreateTicketCategory {
            event_id,
            name: "VIP".to_string(),
            description: "Front row".to_string(),
            unit_price_cents: 15000,
            total_seats: 2,
        }
    }

    #[tokio::test]
    async fn test_reserve_checks_and_decrements() {
        let store = MemoryInventoryStore::new();
        let cat = store.create_category(&vip(Uuid::new_v4())).await.unwrap();

        assert_eq!(
            store.reserve_seats(cat.id, 2).await.unwrap(),
            ReserveOutcome::Reserved
        );
        assert_eq!(
            store.reserve_seats(cat.id, 1).await.unwrap(),
            ReserveOutcome::Insufficient
        );
        assert_eq!(
            store.reserve_seats(Uuid::new_v4(), 1).await.unwrap(),
            ReserveOutcome::NotFound
        );

        let stored = store.get_category(cat.id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 0);
    }

    #[tokio::test]
    async fn test_release_is_capped_at_total_seats() {
        let store = MemoryInventoryStore::new();
        let cat = store.create_category(&vip(Uuid::new_v4())).await.unwrap();

        store.reserve_seats(cat.id, 1).await.unwrap();
        // Erroneous double release must not push the pool above total.
        assert!(store.release_seats(cat.id, 1).await.unwrap());
        assert!(store.release_seats(cat.id, 1).await.unwrap());

        let stored = store.get_category(cat.id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, stored.total_seats);

        assert!(!store.release_seats(Uuid::new_v4(), 1).await.unwrap());
    }
}
