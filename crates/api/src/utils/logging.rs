//! Structured logging helpers for the command layer.

use std::time::Duration;

use civica_domain::CivicaError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// The `CIVICA_LOG` environment variable wins over the configured default
/// directive. Safe to call more than once; later calls are no-ops.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_env("CIVICA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"reminders::press_reminder"`).
/// * `elapsed` - Duration the command execution took.
/// * `success` - Whether the command completed successfully.
///
/// The helper keeps the command wrappers concise and the log shape
/// consistent. Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `CivicaError` into a stable label suitable for metrics/logging.
#[inline]
pub fn error_label(error: &CivicaError) -> &'static str {
    match error {
        CivicaError::Database(_) => "database",
        CivicaError::Config(_) => "config",
        CivicaError::Permission(_) => "permission",
        CivicaError::Calendar(_) => "calendar",
        CivicaError::NotFound(_) => "not_found",
        CivicaError::InvalidInput(_) => "invalid_input",
        CivicaError::Internal(_) => "internal",
    }
}
