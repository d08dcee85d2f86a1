//! Keyed store for persisted reminder state.
//!
//! All mutations of the message-to-event mapping and the preferred calendar
//! go through [`CalendarEventStore::dispatch`]; coordinators issue actions
//! and never touch the repository directly. Reads are plain queries.

use std::sync::Arc;

use civica_domain::{CalendarEventLink, DeviceCalendar, MessageId, Result};
use tracing::debug;

use super::ports::CalendarEventRepository;

/// An intent to mutate persisted reminder state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Link a message to a device calendar event
    AddCalendarEvent(CalendarEventLink),
    /// Drop the link for a message (user removal or stale-state cleanup)
    RemoveCalendarEvent(MessageId),
    /// Remember the calendar chosen for reminders
    SavePreferredCalendar(DeviceCalendar),
}

/// Single mutation path over the persisted reminder state.
pub struct CalendarEventStore {
    repository: Arc<dyn CalendarEventRepository>,
}

impl CalendarEventStore {
    pub fn new(repository: Arc<dyn CalendarEventRepository>) -> Self {
        Self { repository }
    }

    /// Apply one action to the persisted state.
    pub async fn dispatch(&self, action: StoreAction) -> Result<()> {
        match action {
            StoreAction::AddCalendarEvent(link) => {
                debug!(message_id = %link.message_id, event_id = %link.event_id, "store: add calendar event");
                self.repository.upsert(&link).await
            }
            StoreAction::RemoveCalendarEvent(message_id) => {
                debug!(%message_id, "store: remove calendar event");
                self.repository.remove(&message_id).await
            }
            StoreAction::SavePreferredCalendar(calendar) => {
                debug!(calendar_id = %calendar.id, "store: save preferred calendar");
                self.repository.save_preferred_calendar(&calendar).await
            }
        }
    }

    /// The link persisted for a message, if any.
    pub async fn event_for_message(
        &self,
        message_id: &MessageId,
    ) -> Result<Option<CalendarEventLink>> {
        self.repository.find_by_message(message_id).await
    }

    /// The calendar the user chose on a previous reminder add, if any.
    pub async fn preferred_calendar(&self) -> Result<Option<DeviceCalendar>> {
        self.repository.preferred_calendar().await
    }
}
