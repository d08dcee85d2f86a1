//! Message action-bar composition command

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use civica_core::{action_bar, PaymentCta};
use civica_domain::{Message, Result, ServiceInfo};
use serde::{Deserialize, Serialize};

use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// Inputs for composing the action bar of one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBarRequest {
    pub message: Message,
    pub service: Option<ServiceInfo>,
    #[serde(default)]
    pub disabled: bool,
}

/// Reminder half of the action bar, for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderBlockDto {
    pub due_date: DateTime<Utc>,
    pub short_label: bool,
}

/// Payment CTA for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum PaymentCtaDto {
    Paid { amount_label: Option<String> },
    Payable { amount_label: String, rpt_id: String, amount_cents: u64 },
    Disabled,
}

impl From<PaymentCta> for PaymentCtaDto {
    fn from(cta: PaymentCta) -> Self {
        match cta {
            PaymentCta::Paid { amount_label } => Self::Paid { amount_label },
            PaymentCta::Payable { navigation, amount_label } => Self::Payable {
                amount_label,
                rpt_id: navigation.rpt_id.to_string(),
                amount_cents: navigation.amount.cents(),
            },
            PaymentCta::Disabled => Self::Disabled,
        }
    }
}

/// Renderable action bar of one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBarDto {
    pub reminder: Option<ReminderBlockDto>,
    pub payment: Option<PaymentCtaDto>,
    pub spacer: bool,
    pub disabled: bool,
}

/// Compose the action bar for a message.
///
/// Pure apart from the paid-record lookup: the reminder block renders iff
/// the message has a due date, the payment block iff it has payment data.
pub async fn get_message_action_bar(
    ctx: &Arc<AppContext>,
    request: ActionBarRequest,
) -> Result<ActionBarDto> {
    let command_name = "action_bar::get_message_action_bar";
    let start = Instant::now();

    let result = compose(ctx, &request).await;

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

async fn compose(ctx: &Arc<AppContext>, request: &ActionBarRequest) -> Result<ActionBarDto> {
    let paid = ctx.paid_records.find_by_message(&request.message.id).await?;

    let layout = action_bar::compose(
        &request.message,
        request.service.as_ref(),
        paid.as_ref(),
        request.disabled,
    );

    Ok(ActionBarDto {
        reminder: layout.reminder.map(|block| ReminderBlockDto {
            due_date: block.due_date,
            short_label: block.short_label,
        }),
        payment: layout.payment.map(PaymentCtaDto::from),
        spacer: layout.spacer,
        disabled: layout.disabled,
    })
}
