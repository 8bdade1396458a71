//! Booking and payment status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a booking.
///
/// `pending -> confirmed` on successful payment confirmation,
/// `pending -> cancelled` on cancellation or expiry. `confirmed` and
/// `cancelled` are terminal; no transition returns a booking to
/// `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Seats are held; payment has not been confirmed.
    Pending,
    /// Payment confirmed; seats committed.
    Confirmed,
    /// Cancelled; held seats were released back to inventory.
    Cancelled,
}

impl BookingStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment.
    Pending,
    /// Payment captured.
    Paid,
    /// Payment abandoned or the booking expired unpaid.
    Failed,
    /// Payment captured and returned after cancellation.
    Refunded,
}

impl PaymentStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
