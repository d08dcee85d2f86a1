//! # Civica Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits)
//! - The reminder and payment CTA coordinators
//! - The keyed calendar-event store and the action-bar composition
//!
//! ## Architecture Principles
//! - Only depends on `civica-domain`
//! - No database or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod messages;
pub mod payments;
pub mod reminders;

// Re-export specific items to avoid ambiguity
pub use messages::action_bar::{self, ActionBarLayout, ReminderBlock};
pub use payments::ports::{PaidPaymentsRepository, PaymentStateStore};
pub use payments::{PaymentCta, PaymentCtaService, PaymentNavigation};
pub use reminders::ports::{
    CalendarEventRepository, CalendarPermissionGateway, CalendarProvider, NotificationSurface,
};
pub use reminders::store::{CalendarEventStore, StoreAction};
pub use reminders::{
    AddReminderOutcome, PressOutcome, ReminderService, RemoveReminderOutcome,
};
