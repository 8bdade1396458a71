//! Request DTOs.
//!
//! Bodies use camelCase field names to match the storefront clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// POST /api/bookings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// The event to book tickets for.
    pub event_id: Uuid,
    /// Requested ticket quantities, one entry per category.
    pub tickets: Vec<TicketSelectionRequest>,
}

/// One requested ticket line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSelectionRequest {
    /// Ticket category id.
    pub category_id: Uuid,
    /// Number of seats requested.
    pub quantity: i32,
}

/// POST /api/bookings/{id}/payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Payment method identifier (e.g. "card").
    pub payment_method: String,
}

/// POST /api/admin/events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Display title.
    pub title: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Event kind (concert, sports, theater, conference, comedy, festival).
    pub kind: String,
    /// Venue display name.
    pub venue_name: String,
    /// Venue street address.
    #[serde(default)]
    pub venue_address: String,
    /// Venue city.
    #[serde(default)]
    pub venue_city: String,
    /// Venue capacity.
    pub venue_capacity: i32,
    /// When the event starts.
    pub starts_at: DateTime<Utc>,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Organizer display name.
    pub organizer_name: String,
    /// Organizer contact.
    #[serde(default)]
    pub organizer_contact: String,
    /// Ticket tiers to create alongside the event.
    #[serde(default)]
    pub ticket_categories: Vec<CreateCategoryRequest>,
}

/// One ticket tier in an event creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    /// Tier display name.
    pub name: String,
    /// Tier description.
    #[serde(default)]
    pub description: String,
    /// Price per seat in cents.
    pub unit_price_cents: i64,
    /// Total seats in the pool.
    pub total_seats: i32,
}

/// PUT /api/admin/categories/{id}/price
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceRequest {
    /// New price per seat in cents.
    pub unit_price_cents: i64,
}

/// Query parameters for the event listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListParams {
    /// Filter by event kind. `category` is accepted as an alias for
    /// compatibility with older storefront clients.
    #[serde(alias = "category")]
    pub kind: Option<String>,
    /// Case-insensitive title/description search term.
    pub search: Option<String>,
}
