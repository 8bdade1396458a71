//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aviola_entity::booking::Booking;
use aviola_entity::category::TicketCategory;
use aviola_entity::event::Event;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// An event together with its ticket categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    /// The event listing.
    #[serde(flatten)]
    pub event: Event,
    /// Ticket tiers with live availability.
    pub ticket_categories: Vec<TicketCategory>,
}

/// Payment confirmation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Reference recorded by the payment collaborator.
    pub payment_id: String,
    /// The confirmed booking.
    pub booking: Booking,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database connectivity: `connected`, `unreachable`, or
    /// `in-memory`.
    pub database: String,
}

/// Acknowledgement for admin mutations without a richer body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdateResponse {
    /// The repriced category.
    pub category_id: Uuid,
    /// New price per seat in cents.
    pub unit_price_cents: i64,
}
