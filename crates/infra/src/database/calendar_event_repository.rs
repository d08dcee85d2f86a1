//! SQLite-backed implementation of the CalendarEventRepository port.

use async_trait::async_trait;
use chrono::Utc;
use civica_core::CalendarEventRepository;
use civica_domain::{CalendarEventLink, DeviceCalendar, MessageId, Result};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, instrument};

use super::pool::SqlitePool;
use crate::errors::InfraError;

/// SQLite implementation of CalendarEventRepository
pub struct SqliteCalendarEventRepository {
    pool: SqlitePool,
}

impl SqliteCalendarEventRepository {
    /// Create a new calendar event repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarEventRepository for SqliteCalendarEventRepository {
    #[instrument(skip(self), fields(message_id = %message_id))]
    async fn find_by_message(&self, message_id: &MessageId) -> Result<Option<CalendarEventLink>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let link = conn
            .query_row(
                "SELECT message_id, event_id FROM calendar_event_links WHERE message_id = ?1",
                params![message_id.as_str()],
                |row| {
                    Ok(CalendarEventLink {
                        message_id: MessageId::new(row.get::<_, String>(0)?),
                        event_id: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(InfraError::from)?;

        Ok(link)
    }

    #[instrument(skip(self, link), fields(message_id = %link.message_id))]
    async fn upsert(&self, link: &CalendarEventLink) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO calendar_event_links (message_id, event_id, created_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(message_id) DO UPDATE SET
                event_id = excluded.event_id,
                created_at = excluded.created_at",
            params![link.message_id.as_str(), link.event_id, now],
        )
        .map_err(InfraError::from)?;

        debug!(event_id = %link.event_id, "stored calendar event link");

        Ok(())
    }

    #[instrument(skip(self), fields(message_id = %message_id))]
    async fn remove(&self, message_id: &MessageId) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let removed = conn
            .execute(
                "DELETE FROM calendar_event_links WHERE message_id = ?1",
                params![message_id.as_str()],
            )
            .map_err(InfraError::from)?;

        debug!(removed, "removed calendar event link");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn preferred_calendar(&self) -> Result<Option<DeviceCalendar>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let calendar = conn
            .query_row(
                "SELECT calendar_id, title, source FROM preferred_calendar WHERE id = 1",
                [],
                |row| {
                    Ok(DeviceCalendar {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        source: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(InfraError::from)?;

        Ok(calendar)
    }

    #[instrument(skip(self, calendar), fields(calendar_id = %calendar.id))]
    async fn save_preferred_calendar(&self, calendar: &DeviceCalendar) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO preferred_calendar (id, calendar_id, title, source, saved_at)
             VALUES (1, ?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                calendar_id = excluded.calendar_id,
                title = excluded.title,
                source = excluded.source,
                saved_at = excluded.saved_at",
            params![calendar.id, calendar.title, calendar.source, now],
        )
        .map_err(InfraError::from)?;

        debug!("saved preferred calendar");

        Ok(())
    }
}
