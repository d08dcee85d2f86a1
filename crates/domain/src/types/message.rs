//! Message types delivered by citizen services

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::payment::PaymentData;

/// Opaque backend identifier of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A message as received from the backend.
///
/// `due_date` and `payment_data` are independently optional; each one gates
/// whether the corresponding action-bar block renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub payment_data: Option<PaymentData>,
}

impl Message {
    /// Build a message carrying only the mandatory fields.
    pub fn new(id: impl Into<String>, subject: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(id),
            subject: subject.into(),
            created_at,
            due_date: None,
            payment_data: None,
        }
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_payment_data(mut self, payment_data: PaymentData) -> Self {
        self.payment_data = Some(payment_data);
        self
    }
}

/// The sender service of a message.
///
/// The organization fiscal code participates in payment identifier
/// derivation; the rest is display data for the UI shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service_id: String,
    pub organization_name: String,
    pub organization_fiscal_code: String,
}
