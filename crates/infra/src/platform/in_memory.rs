//! In-process device calendar used by headless runs and tests.
//!
//! Keeps calendars and events in memory behind the same ports the real
//! device bridge implements. Failure injection flags let tests exercise the
//! provider-error paths of the coordinators.

use std::collections::HashMap;

use async_trait::async_trait;
use civica_core::{CalendarPermissionGateway, CalendarProvider};
use civica_domain::{
    CivicaError, DeviceCalendar, DeviceEvent, EventWriteRequest, Result,
};
use parking_lot::Mutex;
use tracing::debug;

/// Permission gateway with a configurable answer.
pub struct InMemoryPermissionGateway {
    granted: Mutex<bool>,
    fail: Mutex<bool>,
}

impl InMemoryPermissionGateway {
    pub fn new(granted: bool) -> Self {
        Self { granted: Mutex::new(granted), fail: Mutex::new(false) }
    }

    pub fn set_granted(&self, granted: bool) {
        *self.granted.lock() = granted;
    }

    /// Make the next checks fail with an OS-style error.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

#[async_trait]
impl CalendarPermissionGateway for InMemoryPermissionGateway {
    async fn request_access(&self) -> Result<bool> {
        if *self.fail.lock() {
            return Err(CivicaError::Permission("authorization status unavailable".into()));
        }
        Ok(*self.granted.lock())
    }
}

/// In-memory device calendar.
#[derive(Default)]
pub struct InMemoryCalendarProvider {
    calendars: Mutex<Vec<DeviceCalendar>>,
    events: Mutex<HashMap<String, DeviceEvent>>,
    next_event_id: Mutex<u64>,
    fail_saves: Mutex<bool>,
    fail_removes: Mutex<bool>,
    fail_finds: Mutex<bool>,
}

impl InMemoryCalendarProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the device with the given calendars.
    pub fn with_calendars(calendars: Vec<DeviceCalendar>) -> Self {
        Self { calendars: Mutex::new(calendars), ..Self::default() }
    }

    /// Replace the device calendars after construction.
    pub fn seed_calendars(&self, calendars: Vec<DeviceCalendar>) {
        *self.calendars.lock() = calendars;
    }

    /// Number of events currently on the device.
    pub fn event_count(&self) -> usize {
        self.events.lock().len()
    }

    pub fn contains_event(&self, event_id: &str) -> bool {
        self.events.lock().contains_key(event_id)
    }

    /// Remove an event out-of-band, as another app would.
    pub fn delete_event_externally(&self, event_id: &str) {
        self.events.lock().remove(event_id);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock() = fail;
    }

    pub fn set_fail_removes(&self, fail: bool) {
        *self.fail_removes.lock() = fail;
    }

    pub fn set_fail_finds(&self, fail: bool) {
        *self.fail_finds.lock() = fail;
    }
}

#[async_trait]
impl CalendarProvider for InMemoryCalendarProvider {
    async fn calendars(&self) -> Result<Vec<DeviceCalendar>> {
        Ok(self.calendars.lock().clone())
    }

    async fn find_event_by_id(&self, event_id: &str) -> Result<Option<DeviceEvent>> {
        if *self.fail_finds.lock() {
            return Err(CivicaError::Calendar("event lookup failed".into()));
        }
        Ok(self.events.lock().get(event_id).cloned())
    }

    async fn save_event(&self, request: &EventWriteRequest) -> Result<String> {
        if *self.fail_saves.lock() {
            return Err(CivicaError::Calendar("event save rejected by device".into()));
        }

        let mut next = self.next_event_id.lock();
        *next += 1;
        let id = format!("evt-{next}");

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

        debug!(event_id = %id, calendar_id = %request.calendar_id, "saved device event");

        Ok(id)
    }

    async fn remove_event(&self, event_id: &str) -> Result<()> {
        if *self.fail_removes.lock() {
            return Err(CivicaError::Calendar("event delete rejected by device".into()));
        }

        self.events.lock().remove(event_id);
        debug!(%event_id, "removed device event");

        Ok(())
    }
}
