//! Seat inventory store: authoritative per-category seat counts.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use aviola_core::result::AppResult;
use aviola_entity::category::{CreateTicketCategory, ReserveOutcome, TicketCategory};

pub use memory::MemoryInventoryStore;
pub use postgres::PgInventoryStore;

/// Authoritative store for per-category seat counts.
///
/// `available_seats` may only be mutated through [`reserve_seats`] and
/// [`release_seats`]; no other component writes it. Implementations
/// must make both operations atomic with respect to all concurrent
/// callers on the same category.
///
/// [`reserve_seats`]: InventoryStore::reserve_seats
/// [`release_seats`]: InventoryStore::release_seats
#[async_trait]
pub trait InventoryStore: Send + Sync + std::fmt::Debug {
    /// Create a new ticket category with a full seat pool.
    async fn create_category(&self, category: &CreateTicketCategory)
    -> AppResult<TicketCategory>;

    /// Look up a category by id.
    async fn get_category(&self, id: Uuid) -> AppResult<Option<TicketCategory>>;

    /// List an event's categories.
    async fn list_for_event(&self, event_id: Uuid) -> AppResult<Vec<TicketCategory>>;

    /// Reprice a category. Returns `false` when it does not exist.
    /// Existing bookings keep their snapshot prices.
    async fn update_price(&self, id: Uuid, unit_price_cents: i64) -> AppResult<bool>;

    /// Atomically check `available_seats >= quantity` and decrement in
    /// one indivisible step. Two concurrent requests for the last
    /// remaining seats must not both succeed.
    async fn reserve_seats(&self, id: Uuid, quantity: i32) -> AppResult<ReserveOutcome>;

    /// Atomically increment `available_seats`, capped at `total_seats`.
    /// Returns `false` when the category does not exist.
    async fn release_seats(&self, id: Uuid, quantity: i32) -> AppResult<bool>;
}
