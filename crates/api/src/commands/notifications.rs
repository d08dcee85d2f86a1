//! Notification drain command

use std::sync::Arc;

use civica_domain::Toast;

use crate::AppContext;

/// Take all pending toasts for rendering, oldest first.
///
/// The UI shell polls this after each command round-trip.
pub fn drain_toasts(ctx: &Arc<AppContext>) -> Vec<Toast> {
    ctx.notifications.drain()
}
