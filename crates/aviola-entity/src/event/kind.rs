//! Event kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of event being ticketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Concert,
    Sports,
    Theater,
    Conference,
    Comedy,
    Festival,
}

impl EventKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concert => "concert",
            Self::Sports => "sports",
            Self::Theater => "theater",
            Self::Conference => "conference",
            Self::Comedy => "comedy",
            Self::Festival => "festival",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = aviola_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concert" => Ok(Self::Concert),
            "sports" => Ok(Self::Sports),
            "theater" => Ok(Self::Theater),
            "conference" => Ok(Self::Conference),
            "comedy" => Ok(Self::Comedy),
            "festival" => Ok(Self::Festival),
            _ => Err(aviola_core::AppError::validation(format!(
                "Invalid event kind: '{s}'. Expected one of: concert, sports, theater, conference, comedy, festival"
            ))),
        }
    }
}
