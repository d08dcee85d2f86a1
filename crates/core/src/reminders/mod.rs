//! Calendar reminder coordination for messages with a due date.

pub mod ports;
pub mod service;
pub mod store;

pub use service::{
    AddReminderOutcome, PressOutcome, ReminderService, RemoveReminderOutcome,
};
