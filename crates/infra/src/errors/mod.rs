//! Conversions from external infrastructure errors into domain errors.

use civica_domain::CivicaError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CivicaError);

impl From<InfraError> for CivicaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CivicaError> for InfraError {
    fn from(value: CivicaError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCivicaError {
    fn into_civica(self) -> CivicaError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → CivicaError */
/* -------------------------------------------------------------------------- */

impl IntoCivicaError for SqlError {
    fn into_civica(self) -> CivicaError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        CivicaError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        CivicaError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        CivicaError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        CivicaError::Database("foreign key constraint violation".into())
                    }
                    _ => CivicaError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => CivicaError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                CivicaError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                CivicaError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => CivicaError::Database("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidParameterName(parameter_name) => {
                CivicaError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => {
                CivicaError::Database(format!("invalid database path: {}", path.to_string_lossy()))
            }
            RE::InvalidQuery => CivicaError::Database("invalid SQL query".into()),
            other => CivicaError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_civica())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → CivicaError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(CivicaError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
