//! Error handling utilities for repositories

use social_core::error::DomainError;
use sqlx::Error as SqlxError;

// SQLSTATE codes with a dedicated domain meaning
const LOCK_NOT_AVAILABLE: &str = "55P03";
const QUERY_CANCELED: &str = "57014";
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
const CHECK_VIOLATION: &str = "23514";

/// Convert SQLx error to DomainError
///
/// Lock waits that hit `lock_timeout` and cancelled statements become
/// `StoreBusy`; serialization failures and deadlocks become
/// `ReactionConflict` so the whole unit of work can be retried.
pub fn map_db_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        match db_err.code().as_deref() {
            Some(LOCK_NOT_AVAILABLE | QUERY_CANCELED) => {
                return DomainError::StoreBusy(db_err.message().to_string());
            }
            Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED) => {
                return DomainError::ReactionConflict;
            }
            Some(CHECK_VIOLATION) => return DomainError::CounterUnderflow,
            _ => {}
        }
    }
    if matches!(e, SqlxError::PoolTimedOut) {
        return DomainError::StoreBusy("timed out acquiring a connection".to_string());
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_busy() {
        let err = map_db_error(SqlxError::PoolTimedOut);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_other_errors_are_database_errors() {
        let err = map_db_error(SqlxError::RowNotFound);
        assert!(matches!(err, DomainError::DatabaseError(_)));

        let err = map_unique_violation(SqlxError::RowNotFound, || DomainError::EmailAlreadyExists);
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
