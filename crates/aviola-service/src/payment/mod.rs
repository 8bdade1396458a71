//! Payment confirmation collaborator.

pub mod mock;

use async_trait::async_trait;
use uuid::Uuid;

use aviola_core::result::AppResult;

pub use mock::MockPaymentGateway;

/// Outcome of a payment confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// The charge went through.
    Approved {
        /// Gateway-issued payment reference.
        reference: String,
    },
    /// The gateway refused the charge. The booking stays pending and
    /// its seats stay held so the user can retry.
    Declined {
        /// Reason for the refusal.
        reason: String,
    },
}

/// External payment collaborator.
///
/// The booking engine never assumes which implementation is active:
/// the shipped [`MockPaymentGateway`] always approves, a production
/// gateway substitutes behind this same interface.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Confirm payment for a booking and obtain a payment reference.
    async fn confirm(
        &self,
        booking_id: Uuid,
        amount_cents: i64,
        method: &str,
    ) -> AppResult<Confirmation>;
}
