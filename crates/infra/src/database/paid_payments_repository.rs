//! SQLite-backed implementation of the PaidPaymentsRepository port.

use async_trait::async_trait;
use chrono::Utc;
use civica_core::PaidPaymentsRepository;
use civica_domain::{MessageId, PaidReason, Result};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, instrument};

use super::pool::SqlitePool;
use crate::errors::InfraError;

/// SQLite implementation of PaidPaymentsRepository
pub struct SqlitePaidPaymentsRepository {
    pool: SqlitePool,
}

impl SqlitePaidPaymentsRepository {
    /// Create a new paid payments repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaidPaymentsRepository for SqlitePaidPaymentsRepository {
    #[instrument(skip(self), fields(message_id = %message_id))]
    async fn find_by_message(&self, message_id: &MessageId) -> Result<Option<PaidReason>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let paid = conn
            .query_row(
                "SELECT message_id, amount, reason FROM paid_payments WHERE message_id = ?1",
                params![message_id.as_str()],
                |row| {
                    Ok(PaidReason {
                        message_id: MessageId::new(row.get::<_, String>(0)?),
                        amount: row.get::<_, i64>(1)? as u64,
                        reason: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(InfraError::from)?;

        Ok(paid)
    }

    #[instrument(skip(self, paid), fields(message_id = %paid.message_id))]
    async fn record(&self, paid: &PaidReason) -> Result<()> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO paid_payments (message_id, amount, reason, recorded_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(message_id) DO UPDATE SET
                amount = excluded.amount,
                reason = excluded.reason,
                recorded_at = excluded.recorded_at",
            params![paid.message_id.as_str(), paid.amount as i64, paid.reason, now],
        )
        .map_err(InfraError::from)?;

        debug!(amount = paid.amount, "recorded settled payment");

        Ok(())
    }
}
