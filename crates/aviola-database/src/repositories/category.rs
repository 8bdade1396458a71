//! Ticket category repository implementation.
//!
//! The reserve/release operations are the concurrency-critical core of
//! the whole system. Both are single conditional `UPDATE` statements so
//! the check-and-mutate happens inside the database, never as a
//! read-then-write from this process.

use sqlx::PgPool;
use uuid::Uuid;

use aviola_core::error::{AppError, ErrorKind};
use aviola_core::result::AppResult;
use aviola_entity::category::{CreateTicketCategory, ReserveOutcome, TicketCategory};

/// Repository for ticket category operations.
#[derive(Debug, Clone)]
pub struct TicketCategoryRepository {
    pool: PgPool,
}

impl TicketCategoryRepository {
    /// Create a new ticket category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new category. The seat pool starts full.
    pub async fn insert(&self, category: &CreateTicketCategory) -> AppResult<TicketCategory> {
        sqlx::query_as::<_, TicketCategory>(
            "INSERT INTO ticket_categories \
             (id, event_id, name, description, unit_price_cents, total_seats, available_seats) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(category.event_id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.unit_price_cents)
        .bind(category.total_seats)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert ticket category", e)
        })
    }

    /// Find a category by its identifier.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TicketCategory>> {
        sqlx::query_as::<_, TicketCategory>("SELECT * FROM ticket_categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find ticket category", e)
            })
    }

    /// List all categories for an event.
    pub async fn find_by_event(&self, event_id: Uuid) -> AppResult<Vec<TicketCategory>> {
        sqlx::query_as::<_, TicketCategory>(
            "SELECT * FROM ticket_categories WHERE event_id = $1 ORDER BY unit_price_cents ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list ticket categories", e)
        })
    }

    /// Update the unit price of a category. Returns `false` when the
    /// category does not exist. Existing bookings keep their snapshot
    /// prices.
    pub async fn update_price(&self, id: Uuid, unit_price_cents: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE ticket_categories \
             SET unit_price_cents = $2, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(unit_price_cents)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update category price", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Atomically reserve `quantity` seats.
    ///
    /// The availability predicate is evaluated by Postgres inside the
    /// `UPDATE`, so two concurrent requests for the last seats can never
    /// both succeed.
    pub async fn reserve_seats(&self, id: Uuid, quantity: i32) -> AppResult<ReserveOutcome> {
        let result = sqlx::query(
            "UPDATE ticket_categories \
             SET available_seats = available_seats - $2, updated_at = NOW() \
             WHERE id = $1 AND available_seats >= $2",
        )
        .bind(id)
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reserve seats", e))?;

        if result.rows_affected() > 0 {
            return Ok(ReserveOutcome::Reserved);
        }

        // Distinguish a missing category from an exhausted pool.
        match self.find_by_id(id).await? {
            Some(_) => Ok(ReserveOutcome::Insufficient),
            None => Ok(ReserveOutcome::NotFound),
        }
    }

    /// Atomically release `quantity` seats, capped at `total_seats`.
    ///
    /// Returns `false` when the category does not exist.
    pub async fn release_seats(&self, id: Uuid, quantity: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE ticket_categories \
             SET available_seats = LEAST(available_seats + $2, total_seats), \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release seats", e))?;

        Ok(result.rows_affected() > 0)
    }
}
