//! Action bar composition for a single message.
//!
//! Pure: the layout is a function of the message content shape plus the
//! inputs the payment derivation needs. The reminder block renders iff the
//! message has a due date, the payment block iff it has payment data, a
//! spacer iff both are present.

use chrono::{DateTime, Utc};
use civica_domain::{Message, PaidReason, ServiceInfo};

use crate::payments::{PaymentCta, PaymentCtaService};

/// Reminder half of the action bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderBlock {
    pub due_date: DateTime<Utc>,
    /// Use the short CTA label; set when the payment block shares the row
    pub short_label: bool,
}

/// Renderable layout of the message action bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBarLayout {
    pub reminder: Option<ReminderBlock>,
    pub payment: Option<PaymentCta>,
    /// Render a spacer between the two blocks
    pub spacer: bool,
    /// Bar-wide flag rendering both CTAs inert
    pub disabled: bool,
}

impl ActionBarLayout {
    /// Nothing to render for this message.
    pub fn is_empty(&self) -> bool {
        self.reminder.is_none() && self.payment.is_none()
    }
}

/// Compose the action bar for a message.
pub fn compose(
    message: &Message,
    service: Option<&ServiceInfo>,
    paid: Option<&PaidReason>,
    disabled: bool,
) -> ActionBarLayout {
    let has_payment = message.payment_data.is_some();

    let reminder = message
        .due_date
        .map(|due_date| ReminderBlock { due_date, short_label: has_payment });

    let payment = has_payment.then(|| PaymentCtaService::derive(message, service, paid));

    let spacer = reminder.is_some() && payment.is_some();

    ActionBarLayout { reminder, payment, spacer, disabled }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use civica_domain::PaymentData;

    use super::*;

    fn bare_message() -> Message {
        Message::new("M1", "Subject", Utc::now())
    }

    fn payment_data() -> PaymentData {
        PaymentData { amount: 1250, notice_number: "112345678901234567".into() }
    }

    #[test]
    fn renders_nothing_without_due_date_or_payment() {
        let layout = compose(&bare_message(), None, None, false);

        assert!(layout.is_empty());
        assert!(!layout.spacer);
    }

    #[test]
    fn renders_only_the_reminder_block_for_a_due_date() {
        let message = bare_message().with_due_date(Utc::now());
        let layout = compose(&message, None, None, false);

        let reminder = layout.reminder.unwrap();
        assert!(!reminder.short_label);
        assert!(layout.payment.is_none());
        assert!(!layout.spacer);
    }

    #[test]
    fn renders_only_the_payment_block_for_payment_data() {
        let message = bare_message().with_payment_data(payment_data());
        let layout = compose(&message, None, None, false);

        assert!(layout.reminder.is_none());
        assert!(layout.payment.is_some());
        assert!(!layout.spacer);
    }

    #[test]
    fn renders_both_blocks_with_a_spacer_and_short_label() {
        let message =
            bare_message().with_due_date(Utc::now()).with_payment_data(payment_data());
        let layout = compose(&message, None, None, false);

        assert!(layout.reminder.as_ref().unwrap().short_label);
        assert!(layout.payment.is_some());
        assert!(layout.spacer);
    }

    #[test]
    fn disabled_flag_is_carried_through() {
        let message = bare_message().with_due_date(Utc::now());
        let layout = compose(&message, None, None, true);
        assert!(layout.disabled);
    }
}
