//! Platform adapters for the device calendar and its permission gateway.
//!
//! Production builds bind the real device bridge supplied by the embedding
//! shell; the in-process adapter here backs headless runs and tests.

pub mod in_memory;

pub use in_memory::{InMemoryCalendarProvider, InMemoryPermissionGateway};
