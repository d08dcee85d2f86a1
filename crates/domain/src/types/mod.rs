//! Domain types and models

pub mod calendar;
pub mod message;
pub mod payment;

use serde::{Deserialize, Serialize};

pub use calendar::{
    CalendarEventLink, DeviceCalendar, DeviceEvent, EventWriteRequest, ReminderStatus,
};
pub use message::{Message, MessageId, ServiceInfo};
pub use payment::{
    NoticeNumber, OrganizationFiscalCode, PaidReason, PaymentAmount, PaymentData, RptId,
};

/// Severity of a transient user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastSeverity {
    Success,
    Warning,
    Danger,
}

/// A transient notification shown by the UI shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub severity: ToastSeverity,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), severity: ToastSeverity::Success }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self { message: message.into(), severity: ToastSeverity::Danger }
    }
}
