//! Health check command for frontend monitoring

use std::sync::Arc;

use crate::context::AppContext;
use crate::utils::health::HealthStatus;

/// Get application health status
///
/// Returns the overall health score plus individual component checks; the
/// UI shell surfaces a degraded banner when `is_healthy` is false.
pub async fn get_app_health(ctx: &Arc<AppContext>) -> HealthStatus {
    ctx.health_check().await
}
