//! SQLite connection pool construction.

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use civica_domain::Result;

use crate::errors::InfraError;

/// Shared SQLite connection pool.
pub type SqlitePool = Pool<SqliteConnectionManager>;

/// A connection checked out of the pool.
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Create a pool over the database file with sane pragmas applied to every
/// connection.
pub fn create_pool<P: AsRef<Path>>(db_path: P, max_size: u32) -> Result<SqlitePool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )
    });

    Pool::builder()
        .max_size(max_size.max(1))
        .build(manager)
        .map_err(|err| InfraError::from(err).into())
}
