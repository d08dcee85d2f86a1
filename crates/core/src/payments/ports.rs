//! Port interfaces for payment CTA coordination

use async_trait::async_trait;
use civica_domain::{MessageId, PaidReason, Result};

/// Trait for looking up payment-completion records
#[async_trait]
pub trait PaidPaymentsRepository: Send + Sync {
    /// The completion record for a message, if its payment is settled
    async fn find_by_message(&self, message_id: &MessageId) -> Result<Option<PaidReason>>;

    /// Record a settled payment
    async fn record(&self, paid: &PaidReason) -> Result<()>;
}

/// Trait for the shared payment flow state.
///
/// The reset is dispatched before navigating into the payment flow so the
/// downstream screens never observe leftover state from an earlier,
/// abandoned attempt. Fire-and-forget from the caller's perspective.
#[async_trait]
pub trait PaymentStateStore: Send + Sync {
    async fn reset(&self) -> Result<()>;
}
