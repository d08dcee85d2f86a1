//! Application context - dependency injection container

use std::fs;
use std::path::Path;
use std::sync::Arc;

use civica_core::{
    CalendarEventRepository, CalendarEventStore, PaidPaymentsRepository, PaymentCtaService,
    ReminderService,
};
use civica_domain::{CivicaError, Config, Result};
use civica_infra::{
    BufferedNotificationSurface, DbManager, InMemoryCalendarProvider, InMemoryPaymentStateStore,
    InMemoryPermissionGateway, SqliteCalendarEventRepository, SqlitePaidPaymentsRepository,
};

/// Type alias for calendar event repository port trait object
type DynCalendarEventRepository = dyn CalendarEventRepository + 'static;

/// Type alias for paid payments repository port trait object
type DynPaidPaymentsRepository = dyn PaidPaymentsRepository + 'static;

/// Application context - holds all services and dependencies
pub struct AppContext {
    // Core services
    pub config: Config,
    pub db: Arc<DbManager>,
    pub reminders: Arc<ReminderService>,
    pub payments: Arc<PaymentCtaService>,
    pub store: Arc<CalendarEventStore>,
    pub calendar_events: Arc<DynCalendarEventRepository>,
    pub paid_records: Arc<DynPaidPaymentsRepository>,

    // Adapters the embedding shell (and tests) interact with directly
    pub permissions: Arc<InMemoryPermissionGateway>,
    pub device_calendar: Arc<InMemoryCalendarProvider>,
    pub payment_state: Arc<InMemoryPaymentStateStore>,
    pub notifications: Arc<BufferedNotificationSurface>,
}

impl AppContext {
    /// Create a new application context with default configuration
    pub async fn new() -> Result<Self> {
        Self::new_with_config(Config::default()).await
    }

    /// Create a new application context with custom configuration
    ///
    /// This method is primarily for testing, allowing tests to specify a
    /// custom database path and avoid conflicts with the production
    /// database.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        if let Some(parent) = Path::new(&config.database.path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    CivicaError::Internal(format!(
                        "failed to create database directory {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }

        // Initialize database and run migrations
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        // Repositories over the shared pool
        let calendar_events: Arc<DynCalendarEventRepository> =
            Arc::new(SqliteCalendarEventRepository::new(db.pool().clone()));
        let paid_records: Arc<DynPaidPaymentsRepository> =
            Arc::new(SqlitePaidPaymentsRepository::new(db.pool().clone()));

        // Platform adapters; the embedding shell swaps in the real device
        // bridge, headless runs and tests use the in-process one
        let permissions = Arc::new(InMemoryPermissionGateway::new(true));
        let device_calendar = Arc::new(InMemoryCalendarProvider::new());
        let payment_state = Arc::new(InMemoryPaymentStateStore::new());
        let notifications = Arc::new(BufferedNotificationSurface::new());

        // The store is the single mutation path over persisted reminder state
        let store = Arc::new(CalendarEventStore::new(calendar_events.clone()));

        // Coordinators
        let reminders = Arc::new(ReminderService::new(
            permissions.clone(),
            device_calendar.clone(),
            store.clone(),
            notifications.clone(),
        ));
        let payments =
            Arc::new(PaymentCtaService::new(paid_records.clone(), payment_state.clone()));

        Ok(Self {
            config,
            db,
            reminders,
            payments,
            store,
            calendar_events,
            paid_records,
            permissions,
            device_calendar,
            payment_state,
            notifications,
        })
    }

    /// Check health of all application components
    ///
    /// Returns a [`crate::utils::health::HealthStatus`] with individual
    /// component checks and an overall score; the application counts as
    /// healthy when the score is at least 0.8.
    pub async fn health_check(&self) -> crate::utils::health::HealthStatus {
        use crate::utils::health::{ComponentHealth, HealthStatus};

        let mut status = HealthStatus::new();

        // Check database connection (async to avoid blocking)
        status = status.add_component(self.check_database_health().await);

        // Stateless services are healthy once constructed
        status = status.add_component(ComponentHealth::healthy("reminder_service"));
        status = status.add_component(ComponentHealth::healthy("payment_cta_service"));
        status = status.add_component(ComponentHealth::healthy("notification_surface"));

        status.calculate_score();

        status
    }

    /// Check database health by attempting a simple query
    ///
    /// Uses spawn_blocking to avoid blocking the async runtime with
    /// synchronous database operations.
    async fn check_database_health(&self) -> crate::utils::health::ComponentHealth {
        use crate::utils::health::ComponentHealth;

        let db = self.db.clone();
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "database health check failed");
                ComponentHealth::unhealthy("database", format!("query failed: {e}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "database health check task panicked");
                ComponentHealth::unhealthy("database", format!("task panic: {e}"))
            }
        }
    }

    /// Shutdown the application context gracefully
    ///
    /// Intentionally a no-op: every component cleans up via `Drop` (the
    /// connection pool closes its handles when the last clone is dropped),
    /// which also covers panic paths where an explicit shutdown call never
    /// happens.
    pub async fn shutdown(&self) -> Result<()> {
        tracing::info!("shutdown called on AppContext");
        Ok(())
    }
}
