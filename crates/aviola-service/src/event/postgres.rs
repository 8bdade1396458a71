//! PostgreSQL-backed event catalog.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use aviola_core::result::AppResult;
use aviola_core::types::pagination::{PageRequest, PageResponse};
use aviola_database::repositories::event::EventRepository;
use aviola_entity::event::{CreateEvent, Event, EventKind};

use super::EventCatalog;

/// Event catalog backed by the `events` table.
#[derive(Debug, Clone)]
pub struct PgEventCatalog {
    repo: Arc<EventRepository>,
}

impl PgEventCatalog {
    /// Creates a new Postgres-backed event catalog.
    pub fn new(repo: Arc<EventRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl EventCatalog for PgEventCatalog {
    async fn create_event(&self, event: &CreateEvent) -> AppResult<Event> {
        self.repo.insert(event).await
    }

    async fn get_event(&self, id: Uuid) -> AppResult<Option<Event>> {
        self.repo.find_by_id(id).await
    }

    async fn list_active(
        &self,
        page: &PageRequest,
        kind: Option<EventKind>,
        search: Option<&str>,
    ) -> AppResult<PageResponse<Event>> {
        self.repo.find_active(page, kind, search).await
    }
}
