//! Conversions from external infrastructure errors into domain errors.

use chronicle_domain::ChronicleError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ChronicleError);

impl From<InfraError> for ChronicleError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ChronicleError> for InfraError {
    fn from(value: ChronicleError) -> Self {
        InfraError(value)
    }
}

impl From<SqlError> for InfraError {
    fn from(err: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        let domain_err = match err {
            RE::SqliteFailure(code, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (code.code, code.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        ChronicleError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        ChronicleError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        ChronicleError::Conflict("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 1555) => {
                        ChronicleError::Conflict("primary key constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        ChronicleError::Database("foreign key constraint violation".into())
                    }
                    _ => ChronicleError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        code.code, code.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                ChronicleError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                ChronicleError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                ChronicleError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                ChronicleError::Database("invalid UTF-8 returned from sqlite".into())
            }
            other => ChronicleError::Database(other.to_string()),
        };

        InfraError(domain_err)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        InfraError(ChronicleError::Database(format!("connection pool error: {err}")))
    }
}
