//! Event repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use aviola_core::error::{AppError, ErrorKind};
use aviola_core::result::AppResult;
use aviola_core::types::pagination::{PageRequest, PageResponse};
use aviola_entity::event::{CreateEvent, Event, EventKind};

/// Repository for event listing CRUD operations.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new event listing and return the stored row.
    pub async fn insert(&self, event: &CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, kind, venue_name, venue_address, \
             venue_city, venue_capacity, starts_at, duration_minutes, organizer_name, \
             organizer_contact, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.kind)
        .bind(&event.venue_name)
        .bind(&event.venue_address)
        .bind(&event.venue_city)
        .bind(event.venue_capacity)
        .bind(event.starts_at)
        .bind(event.duration_minutes)
        .bind(&event.organizer_name)
        .bind(&event.organizer_contact)
        .bind(event.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert event", e))
    }

    /// Find an event by its identifier.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// List active events ordered by start time, with optional kind and
    /// free-text filters.
    ///
    /// The search term matches title or description, case-insensitively.
    pub async fn find_active(
        &self,
        page: &PageRequest,
        kind: Option<EventKind>,
        search: Option<&str>,
    ) -> AppResult<PageResponse<Event>> {
        let filter = "status = 'active' \
             AND ($1::event_kind IS NULL OR kind = $1) \
             AND ($2::text IS NULL \
                  OR title ILIKE '%' || $2 || '%' \
                  OR description ILIKE '%' || $2 || '%')";

        let items = sqlx::query_as::<_, Event>(&format!(
            "SELECT * FROM events WHERE {filter} ORDER BY starts_at ASC LIMIT $3 OFFSET $4"
        ))
        .bind(kind)
        .bind(search)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM events WHERE {filter}"))
                .bind(kind)
                .bind(search)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count events", e)
                })?;

        Ok(PageResponse::new(items, page, total as u64))
    }
}
