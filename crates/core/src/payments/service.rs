//! Payment CTA coordination - pure derivation plus the press side effects.
//!
//! The CTA is re-derived on every render from the message payment data, the
//! sender service and the completion record. A settled payment is terminal:
//! it wins over whatever the amount/identifier parsing would say.

use std::sync::Arc;

use civica_domain::{
    format_payment_amount, Message, PaidReason, PaymentAmount, Result, RptId, ServiceInfo,
};
use tracing::{debug, error};

use super::ports::{PaidPaymentsRepository, PaymentStateStore};

/// Navigation target of an enabled payment CTA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentNavigation {
    pub rpt_id: RptId,
    pub amount: PaymentAmount,
}

/// Renderable state of the payment CTA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentCta {
    /// The payment is settled: non-interactive, distinct styling
    Paid { amount_label: Option<String> },
    /// Amount and identifier both resolved: pressing navigates
    Payable { navigation: PaymentNavigation, amount_label: String },
    /// Amount or identifier failed to resolve: non-interactive, default
    /// styling, no notification
    Disabled,
}

impl PaymentCta {
    /// Whether pressing the CTA does anything.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Payable { .. })
    }
}

/// Payment CTA coordination service
pub struct PaymentCtaService {
    paid_records: Arc<dyn PaidPaymentsRepository>,
    payment_state: Arc<dyn PaymentStateStore>,
}

impl PaymentCtaService {
    pub fn new(
        paid_records: Arc<dyn PaidPaymentsRepository>,
        payment_state: Arc<dyn PaymentStateStore>,
    ) -> Self {
        Self { paid_records, payment_state }
    }

    /// Pure CTA derivation. Evaluated on each render.
    pub fn derive(
        message: &Message,
        service: Option<&ServiceInfo>,
        paid: Option<&PaidReason>,
    ) -> PaymentCta {
        let Some(payment_data) = message.payment_data.as_ref() else {
            return PaymentCta::Disabled;
        };

        let amount = PaymentAmount::from_cents(payment_data.amount);
        let amount_label = amount.map(format_payment_amount);

        if paid.is_some() {
            return PaymentCta::Paid { amount_label };
        }

        let rpt_id = service.and_then(|service| {
            RptId::from_notice_number(
                &service.organization_fiscal_code,
                &payment_data.notice_number,
            )
        });

        match (amount, rpt_id, amount_label) {
            (Some(amount), Some(rpt_id), Some(amount_label)) => PaymentCta::Payable {
                navigation: PaymentNavigation { rpt_id, amount },
                amount_label,
            },
            _ => PaymentCta::Disabled,
        }
    }

    /// Derive the CTA for a message, loading its completion record.
    pub async fn derive_for_message(
        &self,
        message: &Message,
        service: Option<&ServiceInfo>,
    ) -> Result<PaymentCta> {
        let paid = self.paid_records.find_by_message(&message.id).await?;
        Ok(Self::derive(message, service, paid.as_ref()))
    }

    /// Handle a press on the CTA.
    ///
    /// A Payable CTA first resets the shared payment flow state, then yields
    /// the navigation target. Paid and Disabled CTAs do nothing: no reset,
    /// no navigation.
    pub async fn press(&self, cta: &PaymentCta) -> Result<Option<PaymentNavigation>> {
        let PaymentCta::Payable { navigation, .. } = cta else {
            debug!("payment CTA press ignored, CTA is not interactive");
            return Ok(None);
        };

        if let Err(err) = self.payment_state.reset().await {
            error!(error = %err, "failed to reset payment flow state");
        }

        Ok(Some(navigation.clone()))
    }
}
