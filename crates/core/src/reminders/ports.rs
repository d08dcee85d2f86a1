//! Port interfaces for reminder coordination
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use civica_domain::{
    CalendarEventLink, DeviceCalendar, DeviceEvent, EventWriteRequest, MessageId, Result, Toast,
};

/// Trait for the OS calendar permission check/request.
///
/// Implementations resolve `true`/`false`; an OS failure is reported as an
/// error but callers treat it as a denial.
#[async_trait]
pub trait CalendarPermissionGateway: Send + Sync {
    /// Check the current authorization status, prompting the user if needed
    async fn request_access(&self) -> Result<bool>;
}

/// Trait for device calendar operations
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// List the calendars available for writing on the device
    async fn calendars(&self) -> Result<Vec<DeviceCalendar>>;

    /// Look up an event by its identifier; `None` when it no longer exists
    async fn find_event_by_id(&self, event_id: &str) -> Result<Option<DeviceEvent>>;

    /// Write an event and return the identifier assigned by the device
    async fn save_event(&self, request: &EventWriteRequest) -> Result<String>;

    /// Delete an event by its identifier
    async fn remove_event(&self, event_id: &str) -> Result<()>;
}

/// Trait for persisting message-to-event links and the preferred calendar
#[async_trait]
pub trait CalendarEventRepository: Send + Sync {
    /// Get the link for a message, if any
    async fn find_by_message(&self, message_id: &MessageId) -> Result<Option<CalendarEventLink>>;

    /// Insert or replace the link for a message
    async fn upsert(&self, link: &CalendarEventLink) -> Result<()>;

    /// Remove the link for a message; removing a missing link is a no-op
    async fn remove(&self, message_id: &MessageId) -> Result<()>;

    /// The calendar the user previously chose for reminders, if any
    async fn preferred_calendar(&self) -> Result<Option<DeviceCalendar>>;

    /// Persist the preferred calendar
    async fn save_preferred_calendar(&self, calendar: &DeviceCalendar) -> Result<()>;
}

/// Trait for the transient notification surface of the UI shell.
///
/// Fire-and-forget: no return value is consumed.
pub trait NotificationSurface: Send + Sync {
    fn show_toast(&self, toast: Toast);
}
