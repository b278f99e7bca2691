//! Error handling utilities for the PostgreSQL provider

use persist_core::ProviderError;
use sqlx::Error as SqlxError;

/// Convert a SQLx error to a backend execution error, keeping the SQLSTATE
pub fn map_db_error(e: SqlxError) -> ProviderError {
    if let Some(db_err) = e.as_database_error() {
        if let Some(code) = db_err.code() {
            return ProviderError::BackendExecution(format!(
                "{} (SQLSTATE {code})",
                db_err.message()
            ));
        }
    }
    ProviderError::BackendExecution(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_keep_message() {
        let err = map_db_error(SqlxError::PoolTimedOut);
        assert!(matches!(err, ProviderError::BackendExecution(ref msg) if msg.contains("timed out")));
        assert_eq!(err.code(), "BACKEND_EXECUTION_ERROR");
    }
}
