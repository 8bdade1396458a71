//! Event lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Listed and bookable.
    Active,
    /// Cancelled by the organizer; hidden from browse results.
    Cancelled,
    /// Every ticket category is exhausted.
    SoldOut,
}

impl EventStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::SoldOut => "sold_out",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
