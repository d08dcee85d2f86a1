//! Buffered notification surface.
//!
//! Toasts are fire-and-forget for the coordinators; the UI shell drains the
//! buffer on its own cadence and renders them.

use civica_core::NotificationSurface;
use civica_domain::Toast;
use parking_lot::Mutex;
use tracing::debug;

/// Queue of pending toasts drained by the UI shell.
#[derive(Default)]
pub struct BufferedNotificationSurface {
    pending: Mutex<Vec<Toast>>,
}

impl BufferedNotificationSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending toasts, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

impl NotificationSurface for BufferedNotificationSurface {
    fn show_toast(&self, toast: Toast) {
        debug!(severity = ?toast.severity, "toast queued");
        self.pending.lock().push(toast);
    }
}
