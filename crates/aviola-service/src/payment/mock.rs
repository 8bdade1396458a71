//! Always-approving payment gateway for demo and test use.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use aviola_core::result::AppResult;

use crate::booking::reference::payment_reference;

use super::{Confirmation, PaymentGateway};

/// Mock payment gateway: approves every charge with a synthesized
/// payment reference.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentGateway;

impl MockPaymentGateway {
    /// Creates a new mock gateway.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn confirm(
        &self,
        booking_id: Uuid,
        amount_cents: i64,
        method: &str,
    ) -> AppResult<Confirmation> {
        let reference = payment_reference();
        info!(
            booking_id = %booking_id,
            amount_cents = amount_cents,
            method = %method,
            reference = %reference,
            "Mock payment approved"
        );
        Ok(Confirmation::Approved { reference })
    }
}
