//! Domain constants shared across crates

/// Number of digits in a pagoPA notice number.
pub const NOTICE_NUMBER_LENGTH: usize = 18;

/// Number of digits in an organization fiscal code.
pub const ORGANIZATION_FISCAL_CODE_LENGTH: usize = 11;

/// Largest payable amount in euro cents (11 digits, pagoPA bound).
pub const MAX_AMOUNT_CENTS: u64 = 99_999_999_999;

/// Default SQLite pool size.
pub const DEFAULT_POOL_SIZE: u32 = 5;

/// Default database file name, relative to the app data directory.
pub const DEFAULT_DATABASE_FILE: &str = "civica.db";
