//! Storage-specific error type wrapping sqlx errors.

use rfid_api_domain::error::RfidError;

/// Errors originating from the `SQLite` storage layer.
///
/// Messages include the underlying driver text; they are shown to clients
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed, including `database is locked`.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Per-request connections cannot share an in-memory database.
    #[error("in-memory database {0:?} is not supported, use a file path")]
    InMemory(String),
}

impl From<StorageError> for RfidError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
