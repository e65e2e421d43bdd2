//! Classification of SQLx errors into repository failures.

use crate::domain::repositories::StoreError;

/// Unique constraint on `links.code`.
const CODE_UNIQUE_CONSTRAINT: &str = "links_code_key";

/// Check constraint enforcing the code alphabet and length.
const CODE_FORMAT_CONSTRAINT: &str = "links_code_format";

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CODE_UNIQUE_CONSTRAINT))
}

pub fn is_code_format_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_check_violation() && matches!(db_err.constraint(), Some(CODE_FORMAT_CONSTRAINT))
}

/// Returns true for failures that mean the database could not be reached.
pub fn is_connection_failure(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed
    )
}

/// Maps a SQLx error to a [`StoreError`].
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::DuplicateCode;
    }

    if is_code_format_violation(&e) {
        return StoreError::InvalidCode;
    }

    if is_connection_failure(&e) {
        return StoreError::Unavailable(e.to_string());
    }

    StoreError::Backend(e.to_string())
}
