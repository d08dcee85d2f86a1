//! Shared helpers for the command layer

pub mod health;
pub mod logging;
