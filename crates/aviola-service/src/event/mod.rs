//! Event catalog: the browse surface for listed events.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use aviola_core::result::AppResult;
use aviola_core::types::pagination::{PageRequest, PageResponse};
use aviola_entity::event::{CreateEvent, Event, EventKind};

pub use memory::MemoryEventCatalog;
pub use postgres::PgEventCatalog;

/// Read/write access to event listings.
#[async_trait]
pub trait EventCatalog: Send + Sync + std::fmt::Debug {
    /// Create a new event listing.
    async fn create_event(&self, event: &CreateEvent) -> AppResult<Event>;

    /// Look up an event by id.
    async fn get_event(&self, id: Uuid) -> AppResult<Option<Event>>;

    /// List active events ordered by start time, optionally filtered by
    /// kind and a case-insensitive title/description search term.
    async fn list_active(
        &self,
        page: &PageRequest,
        kind: Option<EventKind>,
        search: Option<&str>,
    ) -> AppResult<PageResponse<Event>>;
}
