//! Shared payment flow state.
//!
//! The payment-summary flow marks itself in progress when entered; the CTA
//! coordinator resets this before navigating so an abandoned attempt never
//! leaks into the next one.

use async_trait::async_trait;
use civica_core::PaymentStateStore;
use civica_domain::{Result, RptId};
use parking_lot::Mutex;
use tracing::debug;

/// Process-wide payment flow state.
#[derive(Default)]
pub struct InMemoryPaymentStateStore {
    in_progress: Mutex<Option<RptId>>,
}

impl InMemoryPaymentStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a payment attempt as in progress (called by the downstream flow).
    pub fn begin(&self, rpt_id: RptId) {
        *self.in_progress.lock() = Some(rpt_id);
    }

    /// The attempt currently in progress, if any.
    pub fn in_progress(&self) -> Option<RptId> {
        self.in_progress.lock().clone()
    }
}

#[async_trait]
impl PaymentStateStore for InMemoryPaymentStateStore {
    async fn reset(&self) -> Result<()> {
        let stale = self.in_progress.lock().take();
        if let Some(rpt_id) = stale {
            debug!(%rpt_id, "cleared stale payment attempt");
        }
        Ok(())
    }
}
