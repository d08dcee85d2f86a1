//! Calendar reminder types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::MessageId;

/// Persisted link between a message and the device calendar event created
/// for its due date.
///
/// Presence of a link does NOT guarantee the event still exists on the
/// device; the event can be removed outside the app. Callers must reconcile
/// with the calendar provider before trusting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventLink {
    pub message_id: MessageId,
    pub event_id: String,
}

/// A calendar available on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCalendar {
    pub id: String,
    pub title: String,
    /// Account the calendar belongs to (e.g. "iCloud", "Google")
    pub source: String,
}

/// An event as read back from the device calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEvent {
    pub id: String,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub all_day: bool,
    pub calendar_id: String,
}

/// Payload for writing a reminder event to the device calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWriteRequest {
    pub title: String,
    pub calendar_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub all_day: bool,
}

impl EventWriteRequest {
    /// An all-day reminder at the given due date.
    pub fn all_day_reminder(
        title: impl Into<String>,
        calendar_id: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            calendar_id: calendar_id.into(),
            start_date: due_date,
            end_date: due_date,
            all_day: true,
        }
    }
}

/// Reminder state of a single message as reported by reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    /// No persisted link, or the link was found stale and cleared
    NotScheduled,
    /// The link exists and the device event was confirmed present
    Scheduled,
    /// The link exists but the device calendar could not be queried;
    /// state stays unreconciled until the next check
    Unverified,
}
