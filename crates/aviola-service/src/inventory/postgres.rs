//! PostgreSQL-backed inventory store.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use aviola_core::result::AppResult;
use aviola_database::repositories::category::TicketCategoryRepository;
use aviola_entity::category::{CreateTicketCategory, ReserveOutcome, TicketCategory};

use super::InventoryStore;

/// Inventory store backed by the `ticket_categories` table.
///
/// Atomicity of reserve/release comes from the repository's conditional
/// `UPDATE` statements; the predicate runs inside Postgres.
#[derive(Debug, Clone)]
pub struct PgInventoryStore {
    repo: Arc<TicketCategoryRepository>,
}

impl PgInventoryStore {
    /// Creates a new Postgres-backed inventory store.
    pub fn new(repo: Arc<TicketCategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn create_category(
        &self,
        category: &CreateTicketCategory,
    ) -> AppResult<TicketCategory> {
        self.repo.insert(category).await
    }

    async fn get_category(&self, id: Uuid) -> AppResult<Option<TicketCategory>> {
        self.repo.find_by_id(id).await
    }

    async fn list_for_event(&self, event_id: Uuid) -> AppResult<Vec<TicketCategory>> {
        self.repo.find_by_event(event_id).await
    }

    async fn update_price(&self, id: Uuid, unit_price_cents: i64) -> AppResult<bool> {
        self.repo.update_price(id, unit_price_cents).await
    }

    async fn reserve_seats(&self, id: Uuid, quantity: i32) -> AppResult<ReserveOutcome> {
        self.repo.reserve_seats(id, quantity).await
    }

    async fn release_seats(&self, id: Uuid, quantity: i32) -> AppResult<bool> {
        self.repo.release_seats(id, quantity).await
    }
}
