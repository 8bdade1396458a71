//! Booking engine configuration.

use serde::{Deserialize, Serialize};

/// Settings for the booking transaction engine and expiry sweeper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How long a booking may stay `pending` before its seats are
    /// released back to inventory.
    #[serde(default = "default_pending_ttl")]
    pub pending_ttl_minutes: u64,
    /// Interval between expiry sweeper cycles.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// Whether the background expiry sweeper runs at all.
    #[serde(default = "default_true")]
    pub sweeper_enabled: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            pending_ttl_minutes: default_pending_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
            sweeper_enabled: true,
        }
    }
}

fn default_pending_ttl() -> u64 {
    30
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}
