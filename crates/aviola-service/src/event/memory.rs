//! In-memory event catalog for single-node deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use aviola_core::result::AppResult;
use aviola_core::types::pagination::{PageRequest, PageResponse};
use aviola_entity::event::{CreateEvent, Event, EventKind, EventStatus};

use super::EventCatalog;

/// In-memory event catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventCatalog {
    /// Events keyed by id.
    state: Arc<Mutex<HashMap<Uuid, Event>>>,
}

impl MemoryEventCatalog {
    /// Creates an empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventCatalog for MemoryEventCatalog {
    async fn create_event(&self, event: &CreateEvent) -> AppResult<Event> {
        let now = Utc::now();
        let stored = Event {
            id: Uuid::new_v4(),
            title: event.title.clone(),
            description: event.description.clone(),
            kind: event.kind,
            venue_name: event.venue_name.clone(),
            venue_address: event.venue_address.clone(),
            venue_city: event.venue_city.clone(),
            venue_capacity: event.venue_capacity,
            starts_at: event.starts_at,
            duration_minutes: event.duration_minutes,
            organizer_name: event.organizer_name.clone(),
            organizer_contact: event.organizer_contact.clone(),
            status: EventStatus::Active,
            created_by: event.created_by,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.lock().await;
        state.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_event(&self, id: Uuid) -> AppResult<Option<Event>> {
        let state = self.state.lock().await;
        Ok(state.get(&id).cloned())
    }

    async fn list_active(
        &self,
        page: &PageRequest,
        kind: Option<EventKind>,
        search: Option<&str>,
    ) -> AppResult<PageResponse<Event>> {
        let state = self.state.lock().await;
        let needle = search.map(str::to_lowercase);

        let mut matching: Vec<Event> = state
            .values()
            .filter(|e| e.status == EventStatus::Active)
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .filter(|e| {
                needle.as_ref().is_none_or(|n| {
                    e.title.to_lowercase().contains(n)
                        || e.description.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.starts_at);

        let total = matching.len() as u64;
        let items: Vec<Event> = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page, total))
    }
}
