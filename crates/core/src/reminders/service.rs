//! Reminder coordination - core business logic
//!
//! Keeps the reminder CTA, the device calendar, and persisted app state
//! consistent for a single message with a due date. Permission denial is a
//! silent no-op and a failed device call leaves every piece of state exactly
//! as it was; the only state transitions are the ones listed on each
//! operation.

use std::sync::Arc;

use civica_domain::{
    CalendarEventLink, CivicaError, DeviceCalendar, EventWriteRequest, Message, MessageId,
    ReminderStatus, Result, Toast,
};
use tracing::{debug, error, warn};

use super::ports::{CalendarPermissionGateway, CalendarProvider, NotificationSurface};
use super::store::{CalendarEventStore, StoreAction};

/// Result of pressing the reminder CTA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// The event is verified present: the UI must show a destructive
    /// confirmation prompt and call [`ReminderService::remove_reminder`]
    /// only on explicit confirmation.
    ConfirmRemoval,
    /// The add flow ran; see the nested outcome.
    Add(AddReminderOutcome),
}

/// Result of the add flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddReminderOutcome {
    Added { link: CalendarEventLink, calendar: DeviceCalendar },
    /// Permission denied (or the OS check failed): nothing happened and no
    /// notification was shown
    PermissionDenied,
    /// No preferred calendar and no caller-supplied pick: the UI must show
    /// a calendar picker and call the add flow again with the selection
    SelectionRequired,
    /// The device save failed; a notification was shown and no state was
    /// committed
    SaveFailed,
}

/// Result of the remove flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveReminderOutcome {
    Removed,
    /// The device delete failed; the persisted link and the device event
    /// are untouched
    RemoveFailed,
}

/// Reminder coordination service
pub struct ReminderService {
    permissions: Arc<dyn CalendarPermissionGateway>,
    calendar: Arc<dyn CalendarProvider>,
    store: Arc<CalendarEventStore>,
    notifications: Arc<dyn NotificationSurface>,
}

impl ReminderService {
    pub fn new(
        permissions: Arc<dyn CalendarPermissionGateway>,
        calendar: Arc<dyn CalendarProvider>,
        store: Arc<CalendarEventStore>,
        notifications: Arc<dyn NotificationSurface>,
    ) -> Self {
        Self { permissions, calendar, store, notifications }
    }

    /// Reconcile the persisted link for a message against the device
    /// calendar.
    ///
    /// The event can be removed outside the app, so the persisted link is
    /// only trusted after an explicit lookup. A stale link is cleared
    /// silently. Permission denial or a provider failure leaves the state
    /// unreconciled until the next check; the failure is never retried here
    /// and never notified to the user.
    pub async fn check_event_in_calendar(&self, message_id: &MessageId) -> Result<ReminderStatus> {
        let Some(link) = self.store.event_for_message(message_id).await? else {
            return Ok(ReminderStatus::NotScheduled);
        };

        if !self.has_permission().await {
            return Ok(ReminderStatus::Unverified);
        }

        match self.calendar.find_event_by_id(&link.event_id).await {
            Ok(Some(_)) => Ok(ReminderStatus::Scheduled),
            Ok(None) => {
                debug!(
                    %message_id,
                    event_id = %link.event_id,
                    "event missing from device calendar, clearing stale link"
                );
                if let Err(err) =
                    self.store.dispatch(StoreAction::RemoveCalendarEvent(link.message_id)).await
                {
                    error!(%message_id, error = %err, "failed to clear stale calendar event link");
                }
                Ok(ReminderStatus::NotScheduled)
            }
            Err(err) => {
                debug!(%message_id, error = %err, "device calendar query failed, leaving state unreconciled");
                Ok(ReminderStatus::Unverified)
            }
        }
    }

    /// Handle a press on the reminder CTA.
    ///
    /// Concurrent presses on the same message are not deduplicated.
    pub async fn press(&self, message: &Message) -> Result<PressOutcome> {
        match self.check_event_in_calendar(&message.id).await? {
            ReminderStatus::Scheduled => Ok(PressOutcome::ConfirmRemoval),
            ReminderStatus::NotScheduled | ReminderStatus::Unverified => {
                Ok(PressOutcome::Add(self.add_reminder(message, None).await?))
            }
        }
    }

    /// Add an all-day reminder at the message due date.
    ///
    /// Uses the preferred calendar when one is set, else the caller-supplied
    /// selection. The chosen calendar becomes preferred only when none was
    /// set before. On device failure nothing is committed.
    pub async fn add_reminder(
        &self,
        message: &Message,
        selected_calendar: Option<DeviceCalendar>,
    ) -> Result<AddReminderOutcome> {
        let due_date = message.due_date.ok_or_else(|| {
            CivicaError::InvalidInput(format!("message {} has no due date", message.id))
        })?;

        if !self.has_permission().await {
            return Ok(AddReminderOutcome::PermissionDenied);
        }

        let preferred = self.store.preferred_calendar().await?;
        let had_preferred = preferred.is_some();
        let Some(calendar) = preferred.or(selected_calendar) else {
            return Ok(AddReminderOutcome::SelectionRequired);
        };

        let title = format!("Reminder: {}", message.subject);
        let request = EventWriteRequest::all_day_reminder(title, calendar.id.as_str(), due_date);

        match self.calendar.save_event(&request).await {
            Ok(event_id) => {
                let link = CalendarEventLink { message_id: message.id.clone(), event_id };

                if !had_preferred {
                    if let Err(err) = self
                        .store
                        .dispatch(StoreAction::SavePreferredCalendar(calendar.clone()))
                        .await
                    {
                        error!(error = %err, "failed to persist preferred calendar");
                    }
                }

                if let Err(err) =
                    self.store.dispatch(StoreAction::AddCalendarEvent(link.clone())).await
                {
                    error!(
                        message_id = %link.message_id,
                        error = %err,
                        "failed to persist calendar event link"
                    );
                }

                self.notifications.show_toast(Toast::success(format!(
                    "Reminder added to calendar \"{}\"",
                    calendar.title
                )));

                Ok(AddReminderOutcome::Added { link, calendar })
            }
            Err(err) => {
                warn!(message_id = %message.id, error = %err, "device calendar save failed");
                self.notifications
                    .show_toast(Toast::danger("Unable to add the reminder to your calendar"));
                Ok(AddReminderOutcome::SaveFailed)
            }
        }
    }

    /// Remove the reminder for a message.
    ///
    /// Must be called only after the UI's destructive confirmation prompt.
    /// On device failure the persisted link and the device event are left
    /// untouched.
    pub async fn remove_reminder(&self, message_id: &MessageId) -> Result<RemoveReminderOutcome> {
        let Some(link) = self.store.event_for_message(message_id).await? else {
            return Err(CivicaError::NotFound(format!(
                "no calendar event linked to message {message_id}"
            )));
        };

        match self.calendar.remove_event(&link.event_id).await {
            Ok(()) => {
                if let Err(err) =
                    self.store.dispatch(StoreAction::RemoveCalendarEvent(link.message_id)).await
                {
                    error!(%message_id, error = %err, "failed to clear calendar event link");
                }
                self.notifications
                    .show_toast(Toast::success("Reminder removed from your calendar"));
                Ok(RemoveReminderOutcome::Removed)
            }
            Err(err) => {
                warn!(%message_id, error = %err, "device calendar delete failed");
                self.notifications
                    .show_toast(Toast::danger("Unable to remove the reminder from your calendar"));
                Ok(RemoveReminderOutcome::RemoveFailed)
            }
        }
    }

    async fn has_permission(&self) -> bool {
        match self.permissions.request_access().await {
            Ok(granted) => granted,
            Err(err) => {
                debug!(error = %err, "calendar permission request failed, treating as denied");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::Utc;
    use civica_domain::{DeviceEvent, ToastSeverity};
    use parking_lot::Mutex;

    use super::super::ports::{CalendarEventRepository, CalendarProvider};
    use super::*;

    struct StaticPermissionGateway {
        granted: bool,
        fail: bool,
    }

    #[async_trait]
    impl CalendarPermissionGateway for StaticPermissionGateway {
        async fn request_access(&self) -> Result<bool> {
            if self.fail {
                return Err(CivicaError::Permission("authorization lookup failed".into()));
            }
            Ok(self.granted)
        }
    }

    #[derive(Default)]
    struct FakeCalendarProvider {
        events: Mutex<HashMap<String, DeviceEvent>>,
        next_id: Mutex<u32>,
        fail_save: bool,
        fail_remove: bool,
        fail_find: bool,
    }

    #[async_trait]
    impl CalendarProvider for FakeCalendarProvider {
        async fn calendars(&self) -> Result<Vec<DeviceCalendar>> {
            Ok(vec![personal_calendar()])
        }

        async fn find_event_by_id(&self, event_id: &str) -> Result<Option<DeviceEvent>> {
            if self.fail_find {
                return Err(CivicaError::Calendar("query failed".into()));
            }
            Ok(self.events.lock().get(event_id).cloned())
        }

        async fn save_event(&self, request: &EventWriteRequest) -> Result<String> {
            if self.fail_save {
                return Err(CivicaError::Calendar("save failed".into()));
            }
            let mut next = self.next_id.lock();
            *next += 1;
            let id = format!("E{next}");
            self.events.lock().insert(
                id.clone(),
                DeviceEvent {
                    id: id.clone(),
                    title: request.title.clone(),
                    start_date: request.start_date,
                    end_date: request.end_date,
                    all_day: request.all_day,
                    calendar_id: request.calendar_id.clone(),
                },
            );
            Ok(id)
        }

        async fn remove_event(&self, event_id: &str) -> Result<()> {
            if self.fail_remove {
                return Err(CivicaError::Calendar("delete failed".into()));
            }
            self.events.lock().remove(event_id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct InMemoryRepository {
        links: Mutex<HashMap<MessageId, CalendarEventLink>>,
        preferred: Mutex<Option<DeviceCalendar>>,
    }

    #[async_trait]
    impl CalendarEventRepository for InMemoryRepository {
        async fn find_by_message(
            &self,
            message_id: &MessageId,
        ) -> Result<Option<CalendarEventLink>> {
            Ok(self.links.lock().get(message_id).cloned())
        }

        async fn upsert(&self, link: &CalendarEventLink) -> Result<()> {
            self.links.lock().insert(link.message_id.clone(), link.clone());
            Ok(())
        }

        async fn remove(&self, message_id: &MessageId) -> Result<()> {
            self.links.lock().remove(message_id);
            Ok(())
        }

        async fn preferred_calendar(&self) -> Result<Option<DeviceCalendar>> {
            Ok(self.preferred.lock().clone())
        }

        async fn save_preferred_calendar(&self, calendar: &DeviceCalendar) -> Result<()> {
            *self.preferred.lock() = Some(calendar.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifications {
        toasts: Mutex<Vec<Toast>>,
    }

    impl NotificationSurface for RecordingNotifications {
        fn show_toast(&self, toast: Toast) {
            self.toasts.lock().push(toast);
        }
    }

    struct Harness {
        service: ReminderService,
        repository: Arc<InMemoryRepository>,
        provider: Arc<FakeCalendarProvider>,
        notifications: Arc<RecordingNotifications>,
    }

    fn harness(permissions: StaticPermissionGateway, provider: FakeCalendarProvider) -> Harness {
        let repository = Arc::new(InMemoryRepository::default());
        let provider = Arc::new(provider);
        let notifications = Arc::new(RecordingNotifications::default());
        let store = Arc::new(CalendarEventStore::new(repository.clone()));
        let service = ReminderService::new(
            Arc::new(permissions),
            provider.clone(),
            store,
            notifications.clone(),
        );
        Harness { service, repository, provider, notifications }
    }

    fn granted() -> StaticPermissionGateway {
        StaticPermissionGateway { granted: true, fail: false }
    }

    fn personal_calendar() -> DeviceCalendar {
        DeviceCalendar { id: "cal-1".into(), title: "Personal".into(), source: "Local".into() }
    }

    fn message_with_due_date(id: &str) -> Message {
        Message::new(id, "Vehicle tax notice", Utc::now()).with_due_date(Utc::now())
    }

    #[tokio::test]
    async fn add_with_preferred_calendar_persists_link_and_notifies() {
        let h = harness(granted(), FakeCalendarProvider::default());
        *h.repository.preferred.lock() = Some(personal_calendar());

        let message = message_with_due_date("M1");
        let outcome = h.service.add_reminder(&message, None).await.unwrap();

        let AddReminderOutcome::Added { link, calendar } = outcome else {
            panic!("expected Added, got {outcome:?}");
        };
        assert_eq!(link.message_id, MessageId::from("M1"));
        assert_eq!(link.event_id, "E1");
        assert_eq!(calendar.id, "cal-1");

        // Persisted link matches and the event landed in the device calendar
        let stored = h.repository.links.lock().get(&MessageId::from("M1")).cloned().unwrap();
        assert_eq!(stored.event_id, "E1");
        assert!(h.provider.events.lock().contains_key("E1"));

        let toasts = h.notifications.toasts.lock();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, ToastSeverity::Success);
    }

    #[tokio::test]
    async fn add_with_permission_denied_is_a_silent_no_op() {
        let h = harness(
            StaticPermissionGateway { granted: false, fail: false },
            FakeCalendarProvider::default(),
        );
        *h.repository.preferred.lock() = Some(personal_calendar());

        let message = message_with_due_date("M1");
        let outcome = h.service.add_reminder(&message, None).await.unwrap();

        assert_eq!(outcome, AddReminderOutcome::PermissionDenied);
        assert!(h.repository.links.lock().is_empty());
        assert!(h.provider.events.lock().is_empty());
        assert!(h.notifications.toasts.lock().is_empty());
    }

    #[tokio::test]
    async fn permission_gateway_error_is_treated_as_denial() {
        let h = harness(
            StaticPermissionGateway { granted: true, fail: true },
            FakeCalendarProvider::default(),
        );
        *h.repository.preferred.lock() = Some(personal_calendar());

        let message = message_with_due_date("M1");
        let outcome = h.service.add_reminder(&message, None).await.unwrap();

        assert_eq!(outcome, AddReminderOutcome::PermissionDenied);
        assert!(h.notifications.toasts.lock().is_empty());
    }

    #[tokio::test]
    async fn add_without_preferred_or_selection_requires_a_pick() {
        let h = harness(granted(), FakeCalendarProvider::default());

        let message = message_with_due_date("M1");
        let outcome = h.service.add_reminder(&message, None).await.unwrap();

        assert_eq!(outcome, AddReminderOutcome::SelectionRequired);
        assert!(h.repository.links.lock().is_empty());
    }

    #[tokio::test]
    async fn first_pick_becomes_preferred_and_is_never_overwritten() {
        let h = harness(granted(), FakeCalendarProvider::default());

        let first = h
            .service
            .add_reminder(&message_with_due_date("M1"), Some(personal_calendar()))
            .await
            .unwrap();
        assert!(matches!(first, AddReminderOutcome::Added { .. }));
        assert_eq!(h.repository.preferred.lock().as_ref().unwrap().id, "cal-1");

        // A later add with a different pick keeps the original preference
        let other = DeviceCalendar { id: "cal-2".into(), title: "Work".into(), source: "Local".into() };
        let second =
            h.service.add_reminder(&message_with_due_date("M2"), Some(other)).await.unwrap();
        let AddReminderOutcome::Added { calendar, .. } = second else {
            panic!("expected Added");
        };
        assert_eq!(calendar.id, "cal-1");
        assert_eq!(h.repository.preferred.lock().as_ref().unwrap().id, "cal-1");
    }

    #[tokio::test]
    async fn failed_save_commits_nothing_and_shows_danger_toast() {
        let provider = FakeCalendarProvider { fail_save: true, ..FakeCalendarProvider::default() };
        let h = harness(granted(), provider);

        let message = message_with_due_date("M1");
        let outcome =
            h.service.add_reminder(&message, Some(personal_calendar())).await.unwrap();

        assert_eq!(outcome, AddReminderOutcome::SaveFailed);
        assert!(h.repository.links.lock().is_empty());
        // The pick is not saved as preferred when the write fails
        assert!(h.repository.preferred.lock().is_none());

        let toasts = h.notifications.toasts.lock();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, ToastSeverity::Danger);
    }

    #[tokio::test]
    async fn remove_clears_link_and_device_event() {
        let h = harness(granted(), FakeCalendarProvider::default());
        *h.repository.preferred.lock() = Some(personal_calendar());

        let message = message_with_due_date("M1");
        h.service.add_reminder(&message, None).await.unwrap();

        let outcome = h.service.remove_reminder(&message.id).await.unwrap();

        assert_eq!(outcome, RemoveReminderOutcome::Removed);
        assert!(h.repository.links.lock().is_empty());
        assert!(h.provider.events.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_remove_keeps_link_and_device_event() {
        let h = harness(granted(), FakeCalendarProvider::default());
        *h.repository.preferred.lock() = Some(personal_calendar());

        let message = message_with_due_date("M1");
        h.service.add_reminder(&message, None).await.unwrap();

        // Make the delete fail from here on
        let failing = FakeCalendarProvider { fail_remove: true, ..FakeCalendarProvider::default() };
        let existing = h.provider.events.lock().clone();
        failing.events.lock().extend(existing);
        let store = Arc::new(CalendarEventStore::new(h.repository.clone()));
        let service = ReminderService::new(
            Arc::new(granted()),
            Arc::new(failing),
            store,
            h.notifications.clone(),
        );

        let outcome = service.remove_reminder(&message.id).await.unwrap();

        assert_eq!(outcome, RemoveReminderOutcome::RemoveFailed);
        assert!(h.repository.links.lock().contains_key(&MessageId::from("M1")));
        let toasts = h.notifications.toasts.lock();
        assert_eq!(toasts.last().unwrap().severity, ToastSeverity::Danger);
    }

    #[tokio::test]
    async fn remove_without_link_is_not_found() {
        let h = harness(granted(), FakeCalendarProvider::default());
        let result = h.service.remove_reminder(&MessageId::from("M1")).await;
        assert!(matches!(result, Err(CivicaError::NotFound(_))));
    }

    #[tokio::test]
    async fn check_reports_not_scheduled_without_a_link() {
        let h = harness(granted(), FakeCalendarProvider::default());
        let status = h.service.check_event_in_calendar(&MessageId::from("M1")).await.unwrap();
        assert_eq!(status, ReminderStatus::NotScheduled);
    }

    #[tokio::test]
    async fn check_confirms_event_present() {
        let h = harness(granted(), FakeCalendarProvider::default());
        *h.repository.preferred.lock() = Some(personal_calendar());

        let message = message_with_due_date("M1");
        h.service.add_reminder(&message, None).await.unwrap();

        let status = h.service.check_event_in_calendar(&message.id).await.unwrap();
        assert_eq!(status, ReminderStatus::Scheduled);
    }

    #[tokio::test]
    async fn check_clears_stale_link_silently_and_is_idempotent() {
        let h = harness(granted(), FakeCalendarProvider::default());
        h.repository
            .upsert(&CalendarEventLink {
                message_id: MessageId::from("M1"),
                event_id: "gone".into(),
            })
            .await
            .unwrap();

        let first = h.service.check_event_in_calendar(&MessageId::from("M1")).await.unwrap();
        assert_eq!(first, ReminderStatus::NotScheduled);
        assert!(h.repository.links.lock().is_empty());
        assert!(h.notifications.toasts.lock().is_empty());

        // Second run finds no link and changes nothing
        let second = h.service.check_event_in_calendar(&MessageId::from("M1")).await.unwrap();
        assert_eq!(second, ReminderStatus::NotScheduled);
        assert!(h.notifications.toasts.lock().is_empty());
    }

    #[tokio::test]
    async fn check_swallows_provider_failure_and_keeps_the_link() {
        let provider = FakeCalendarProvider { fail_find: true, ..FakeCalendarProvider::default() };
        let h = harness(granted(), provider);
        h.repository
            .upsert(&CalendarEventLink { message_id: MessageId::from("M1"), event_id: "E1".into() })
            .await
            .unwrap();

        let status = h.service.check_event_in_calendar(&MessageId::from("M1")).await.unwrap();

        assert_eq!(status, ReminderStatus::Unverified);
        assert!(h.repository.links.lock().contains_key(&MessageId::from("M1")));
    }

    #[tokio::test]
    async fn press_routes_to_confirm_removal_when_scheduled() {
        let h = harness(granted(), FakeCalendarProvider::default());
        *h.repository.preferred.lock() = Some(personal_calendar());

        let message = message_with_due_date("M1");
        h.service.add_reminder(&message, None).await.unwrap();

        let outcome = h.service.press(&message).await.unwrap();
        assert_eq!(outcome, PressOutcome::ConfirmRemoval);
    }

    #[tokio::test]
    async fn press_runs_the_add_flow_when_not_scheduled() {
        let h = harness(granted(), FakeCalendarProvider::default());
        *h.repository.preferred.lock() = Some(personal_calendar());

        let message = message_with_due_date("M1");
        let outcome = h.service.press(&message).await.unwrap();

        assert!(matches!(outcome, PressOutcome::Add(AddReminderOutcome::Added { .. })));
    }
}
