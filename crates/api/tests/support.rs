//! Shared helpers for the command integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use civica_domain::{
    Config, DatabaseConfig, DeviceCalendar, Message, PaymentData, ServiceInfo,
};
use civica_lib::AppContext;
use tempfile::TempDir;

pub const FISCAL_CODE: &str = "01199250158";
pub const NOTICE_NUMBER: &str = "112345678901234567";

/// Create a test context with a unique database and a seeded device
/// calendar.
pub async fn create_test_context() -> (Arc<AppContext>, TempDir) {
    civica_lib::utils::logging::init_tracing("warn");

    let temp_dir = TempDir::new().expect("failed to create temporary test directory");

    let config = Config {
        database: DatabaseConfig {
            path: temp_dir.path().join("civica.db").to_string_lossy().to_string(),
            pool_size: 5,
        },
        ..Config::default()
    };

    let ctx =
        AppContext::new_with_config(config).await.expect("failed to create test context");
    ctx.device_calendar.seed_calendars(vec![personal_calendar(), work_calendar()]);

    (Arc::new(ctx), temp_dir)
}

pub fn personal_calendar() -> DeviceCalendar {
    DeviceCalendar { id: "cal-personal".into(), title: "Personal".into(), source: "Local".into() }
}

pub fn work_calendar() -> DeviceCalendar {
    DeviceCalendar { id: "cal-work".into(), title: "Work".into(), source: "Local".into() }
}

pub fn sender_service() -> ServiceInfo {
    ServiceInfo {
        service_id: "tax-office".into(),
        organization_name: "Comune di Milano".into(),
        organization_fiscal_code: FISCAL_CODE.into(),
    }
}

pub fn bare_message(id: &str) -> Message {
    Message::new(id, "General information", Utc::now())
}

pub fn message_with_due_date(id: &str) -> Message {
    bare_message(id).with_due_date(Utc::now() + Duration::days(14))
}

pub fn message_with_payment(id: &str) -> Message {
    bare_message(id).with_payment_data(PaymentData {
        amount: 1250,
        notice_number: NOTICE_NUMBER.into(),
    })
}

pub fn message_with_both(id: &str) -> Message {
    message_with_due_date(id).with_payment_data(PaymentData {
        amount: 1250,
        notice_number: NOTICE_NUMBER.into(),
    })
}
