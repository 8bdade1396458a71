//! Event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::EventKind;
use super::status::EventStatus;

/// A ticketed event listed in the storefront.
///
/// Serializes with camelCase keys; the storefront wire format is
/// camelCase throughout.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Event kind (concert, sports, ...).
    pub kind: EventKind,
    /// Venue display name.
    pub venue_name: String,
    /// Venue street address.
    pub venue_address: String,
    /// Venue city.
    pub venue_city: String,
    /// Venue capacity (informational; seat inventory lives on the
    /// ticket categories).
    pub venue_capacity: i32,
    /// When the event starts.
    pub starts_at: DateTime<Utc>,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Organizer display name.
    pub organizer_name: String,
    /// Organizer contact (email or phone).
    pub organizer_contact: String,
    /// Lifecycle status.
    pub status: EventStatus,
    /// The admin user who created the listing.
    pub created_by: Uuid,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event is open for booking.
    pub fn is_bookable(&self) -> bool {
        matches!(self.status, EventStatus::Active)
    }
}

/// Data required to create a new event listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Event kind.
    pub kind: EventKind,
    /// Venue display name.
    pub venue_name: String,
    /// Venue street address.
    pub venue_address: String,
    /// Venue city.
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
    pub organizer_contact: String,
    /// The admin user creating the listing.
    pub created_by: Uuid,
}
