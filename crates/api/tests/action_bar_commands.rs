//! Integration tests for the action-bar composition command

mod support;

use civica_core::PaidPaymentsRepository;
use civica_domain::{MessageId, PaidReason};
use civica_lib::{get_message_action_bar, ActionBarRequest, PaymentCtaDto};
use support::{
    bare_message, create_test_context, message_with_both, message_with_due_date,
    message_with_payment, sender_service,
};

fn request(message: civica_domain::Message) -> ActionBarRequest {
    ActionBarRequest { message, service: Some(sender_service()), disabled: false }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_renders_nothing_without_due_date_or_payment() {
    let (ctx, _temp_dir) = create_test_context().await;

    let bar = get_message_action_bar(&ctx, request(bare_message("M1")))
        .await
        .expect("compose failed");

    assert!(bar.reminder.is_none());
    assert!(bar.payment.is_none());
    assert!(!bar.spacer);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_due_date_alone_renders_only_the_reminder_block() {
    let (ctx, _temp_dir) = create_test_context().await;

    let bar = get_message_action_bar(&ctx, request(message_with_due_date("M1")))
        .await
        .expect("compose failed");

    let reminder = bar.reminder.expect("reminder block missing");
    assert!(!reminder.short_label);
    assert!(bar.payment.is_none());
    assert!(!bar.spacer);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_payment_data_alone_renders_only_the_payment_block() {
    let (ctx, _temp_dir) = create_test_context().await;

    let bar = get_message_action_bar(&ctx, request(message_with_payment("M1")))
        .await
        .expect("compose failed");

    assert!(bar.reminder.is_none());
    assert!(matches!(bar.payment, Some(PaymentCtaDto::Payable { .. })));
    assert!(!bar.spacer);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_both_blocks_render_with_spacer_and_short_label() {
    let (ctx, _temp_dir) = create_test_context().await;

    let bar = get_message_action_bar(&ctx, request(message_with_both("M1")))
        .await
        .expect("compose failed");

    assert!(bar.reminder.expect("reminder block missing").short_label);
    assert!(bar.payment.is_some());
    assert!(bar.spacer);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_paid_message_renders_the_paid_cta() {
    let (ctx, _temp_dir) = create_test_context().await;
    ctx.paid_records
        .record(&PaidReason { message_id: MessageId::from("M1"), amount: 1250, reason: None })
        .await
        .expect("failed to record payment");

    let bar = get_message_action_bar(&ctx, request(message_with_payment("M1")))
        .await
        .expect("compose failed");

    assert!(matches!(bar.payment, Some(PaymentCtaDto::Paid { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_disabled_flag_is_carried_through() {
    let (ctx, _temp_dir) = create_test_context().await;

    let mut req = request(message_with_both("M1"));
    req.disabled = true;

    let bar = get_message_action_bar(&ctx, req).await.expect("compose failed");
    assert!(bar.disabled);
}
