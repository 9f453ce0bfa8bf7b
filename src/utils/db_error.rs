//! Translation of `sqlx` errors into [`StoreError`].

use crate::error::StoreError;

/// Name of the uniqueness constraint on `short_urls.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "short_urls_short_code_key";

/// Returns true if the error is a unique violation on the short code.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}

/// Maps a failed insert to [`StoreError::DuplicateKey`] when the code is
/// taken, and to [`StoreError::Unavailable`] otherwise.
pub fn map_insert_error(e: sqlx::Error, short_code: &str) -> StoreError {
    if is_unique_violation_on_code(&e) {
        StoreError::DuplicateKey(short_code.to_string())
    } else {
        map_sqlx_error(e)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}
