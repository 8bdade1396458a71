//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{BookingStatus, PaymentStatus};

/// One line of a booking: a quantity of seats in a single ticket
/// category, priced at the category's rate *at booking time*.
///
/// The snapshot price is immutable. Later repricing of the category
/// never changes an existing booking's line items or total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingLineItem {
    /// The ticket category.
    pub category_id: Uuid,
    /// Number of seats. Always positive.
    pub quantity: i32,
    /// Price per seat in cents, snapshotted at booking time.
    pub unit_price_cents: i64,
}

impl BookingLineItem {
    /// Line subtotal in cents.
    pub fn subtotal_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity as i64
    }
}

/// A user's reservation of one or more ticket line items for an event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// Human-readable booking reference (`AV...`), unique, never reused.
    pub reference: String,
    /// The owning user.
    pub user_id: Uuid,
    /// The event the tickets are for.
    pub event_id: Uuid,
    /// Ordered line items, stored as a JSON document.
    #[sqlx(json)]
    pub tickets: Vec<BookingLineItem>,
    /// Total in cents. Computed once at creation from the snapshotted
    /// line items; never recomputed.
    pub total_amount_cents: i64,
    /// Booking lifecycle status.
    pub booking_status: BookingStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Reference returned by the payment collaborator, once paid.
    pub payment_reference: Option<String>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether payment confirmation is still possible.
    pub fn is_pending(&self) -> bool {
        matches!(self.booking_status, BookingStatus::Pending)
    }

    /// Sum of the line-item subtotals. Always equals
    /// `total_amount_cents` for a well-formed booking.
    pub fn line_total_cents(&self) -> i64 {
        self.tickets.iter().map(BookingLineItem::subtotal_cents).sum()
    }
}

/// Data required to persist a new booking record.
///
/// The identifier and reference are generated by the caller so that the
/// ledger write is a single insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    /// Pre-generated booking identifier.
    pub id: Uuid,
    /// Pre-generated booking reference.
    pub reference: String,
    /// The owning user.
    pub user_id: Uuid,
    /// The event the tickets are for.
    pub event_id: Uuid,
    /// Ordered line items with snapshotted prices.
    pub tickets: Vec<BookingLineItem>,
    /// Total in cents.
    pub total_amount_cents: i64,
}

/// A partial status update applied through a conditional transition.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct StatusUpdate {
    /// New booking status.
    pub booking_status: Option<BookingStatus>,
    /// New payment status.
    pub payment_status: Option<PaymentStatus>,
    /// Payment reference to record.
    pub payment_reference: Option<String>,
}
