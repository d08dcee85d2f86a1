//! Payment CTA commands

use std::sync::Arc;
use std::time::Instant;

use civica_domain::{Message, Result, ServiceInfo};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::action_bar::PaymentCtaDto;
use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// Navigation target for the payment-summary flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNavigationDto {
    pub rpt_id: String,
    pub amount_cents: u64,
}

/// Derive the payment CTA for a message.
pub async fn get_payment_cta(
    ctx: &Arc<AppContext>,
    message: &Message,
    service: Option<&ServiceInfo>,
) -> Result<PaymentCtaDto> {
    let command_name = "payments::get_payment_cta";
    let start = Instant::now();

    let result =
        ctx.payments.derive_for_message(message, service).await.map(PaymentCtaDto::from);

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// Handle a press on the payment CTA.
///
/// Returns the navigation target when the CTA is payable; a Paid or
/// Disabled CTA yields `None` with no side effects. A payable press resets
/// the shared payment flow state before navigation so the downstream flow
/// never observes a stale attempt.
pub async fn press_payment_cta(
    ctx: &Arc<AppContext>,
    message: &Message,
    service: Option<&ServiceInfo>,
) -> Result<Option<PaymentNavigationDto>> {
    let command_name = "payments::press_payment_cta";
    let start = Instant::now();

    info!(command = command_name, message_id = %message.id, "payment CTA pressed");

    let result = async {
        let cta = ctx.payments.derive_for_message(message, service).await?;
        let navigation = ctx.payments.press(&cta).await?;
        Ok(navigation.map(|navigation| PaymentNavigationDto {
            rpt_id: navigation.rpt_id.to_string(),
            amount_cents: navigation.amount.cents(),
        }))
    }
    .await;

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}
