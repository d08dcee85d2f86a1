//! Reminder CTA commands

use std::sync::Arc;
use std::time::Instant;

use civica_core::{AddReminderOutcome, PressOutcome, RemoveReminderOutcome};
use civica_domain::{DeviceCalendar, Message, MessageId, ReminderStatus, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::utils::logging::{error_label, log_command_execution};
use crate::AppContext;

/// Outcome of pressing the reminder CTA, for the UI shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum ReminderPressDto {
    /// Show the destructive confirmation prompt, then call
    /// [`remove_reminder`] on explicit confirmation
    ConfirmRemoval,
    Added { event_id: String, calendar_title: String },
    /// Silent no-op: render nothing
    PermissionDenied,
    /// Show the calendar picker, then call [`add_reminder_with_calendar`]
    SelectionRequired,
    /// A failure toast was already queued
    SaveFailed,
}

impl From<AddReminderOutcome> for ReminderPressDto {
    fn from(outcome: AddReminderOutcome) -> Self {
        match outcome {
            AddReminderOutcome::Added { link, calendar } => {
                Self::Added { event_id: link.event_id, calendar_title: calendar.title }
            }
            AddReminderOutcome::PermissionDenied => Self::PermissionDenied,
            AddReminderOutcome::SelectionRequired => Self::SelectionRequired,
            AddReminderOutcome::SaveFailed => Self::SaveFailed,
        }
    }
}

/// Outcome of the remove flow, for the UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum ReminderRemoveDto {
    Removed,
    /// A failure toast was already queued; state is untouched
    RemoveFailed,
}

/// Reconcile the persisted reminder link of a message against the device
/// calendar and report the resulting status.
///
/// Called when the action bar mounts. A stale link is cleared silently.
pub async fn check_reminder(ctx: &Arc<AppContext>, message_id: &str) -> Result<ReminderStatus> {
    let command_name = "reminders::check_reminder";
    let start = Instant::now();

    let result = ctx.reminders.check_event_in_calendar(&MessageId::from(message_id)).await;

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// Handle a press on the reminder CTA.
pub async fn press_reminder(ctx: &Arc<AppContext>, message: &Message) -> Result<ReminderPressDto> {
    let command_name = "reminders::press_reminder";
    let start = Instant::now();

    info!(command = command_name, message_id = %message.id, "reminder CTA pressed");

    let result = ctx.reminders.press(message).await.map(|outcome| match outcome {
        PressOutcome::ConfirmRemoval => ReminderPressDto::ConfirmRemoval,
        PressOutcome::Add(add) => ReminderPressDto::from(add),
    });

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// Re-run the add flow with the calendar the user picked in the modal.
pub async fn add_reminder_with_calendar(
    ctx: &Arc<AppContext>,
    message: &Message,
    calendar: DeviceCalendar,
) -> Result<ReminderPressDto> {
    let command_name = "reminders::add_reminder_with_calendar";
    let start = Instant::now();

    let result =
        ctx.reminders.add_reminder(message, Some(calendar)).await.map(ReminderPressDto::from);

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// Remove the reminder for a message.
///
/// Only called after the UI's destructive confirmation prompt.
pub async fn remove_reminder(ctx: &Arc<AppContext>, message_id: &str) -> Result<ReminderRemoveDto> {
    let command_name = "reminders::remove_reminder";
    let start = Instant::now();

    let result =
        ctx.reminders.remove_reminder(&MessageId::from(message_id)).await.map(
            |outcome| match outcome {
                RemoveReminderOutcome::Removed => ReminderRemoveDto::Removed,
                RemoveReminderOutcome::RemoveFailed => ReminderRemoveDto::RemoveFailed,
            },
        );

    if let Err(err) = &result {
        tracing::warn!(
            command = command_name,
            error = %err,
            error_type = error_label(err),
            "remove_reminder failed"
        );
    }

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// List the device calendars for the selection modal.
pub async fn get_device_calendars(ctx: &Arc<AppContext>) -> Result<Vec<DeviceCalendar>> {
    let command_name = "reminders::get_device_calendars";
    let start = Instant::now();

    use civica_core::CalendarProvider;
    let result = ctx.device_calendar.calendars().await;

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}
