//! Ticket category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A ticket tier for an event (e.g. VIP, General) with its own price
/// and seat pool.
///
/// `available_seats` is the only contended field in the system. It is
/// mutated exclusively through the inventory store's atomic
/// reserve/release operations and always satisfies
/// `0 <= available_seats <= total_seats`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketCategory {
    /// Unique category identifier.
    pub id: Uuid,
    /// The event this tier belongs to.
    pub event_id: Uuid,
    /// Tier display name.
    pub name: String,
    /// Tier description.
    pub description: String,
    /// Price per seat in minor currency units (cents).
    pub unit_price_cents: i64,
    /// Total seats in the pool. Immutable after creation.
    pub total_seats: i32,
    /// Seats remaining for sale.
    pub available_seats: i32,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

impl TicketCategory {
    /// Whether the pool is exhausted.
    pub fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }
}

/// Data required to create a new ticket category.
///
/// `available_seats` starts equal to `total_seats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketCategory {
    /// The event this tier belongs to.
    pub event_id: Uuid,
    /// Tier display name.
    pub name: String,
    /// Tier description.
    pub description: String,
    /// Price per seat in cents.
    pub unit_price_cents: i64,
    /// Total seats in the pool.
    pub total_seats: i32,
}

/// Outcome of an atomic seat reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// Seats were decremented.
    Reserved,
    /// The pool exists but holds fewer seats than requested.
    Insufficient,
    /// No such category.
    NotFound,
}
