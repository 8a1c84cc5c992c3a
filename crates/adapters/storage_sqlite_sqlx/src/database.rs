//! `SQLite` connection setup and migration runner.
//!
//! There is no pool. Every repository call opens its own connection through
//! [`Database::connect`] and releases it before returning, so concurrent
//! writers contend on `SQLite`'s file lock exactly as separate processes would.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use crate::error::StorageError;

/// How long a connection waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:rfid_data.db`). Must name a file.
    pub database_url: String,
    /// Lock wait before a statement fails with `database is locked`.
    pub busy_timeout: Duration,
}

impl Config {
    /// Configuration for `database_url` with the default busy timeout.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the database file if missing and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is in-memory or invalid, or if
    /// the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url, self.busy_timeout).await
    }
}

/// Connection factory for the record database.
#[derive(Clone)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    /// Validate the URL, create the file if needed and run migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    async fn initialize(database_url: &str, busy_timeout: Duration) -> Result<Self, StorageError> {
        if is_in_memory(database_url) {
            return Err(StorageError::InMemory(database_url.to_owned()));
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(busy_timeout);
        let database = Self { options };

        let mut conn = database.connect().await?;
        let migrated = sqlx::migrate!("./migrations").run(&mut conn).await;
        release(conn).await;
        migrated?;

        tracing::info!(url = %database_url, "database ready");
        Ok(database)
    }

    /// Open a fresh connection scoped to one request.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the file cannot be opened.
    pub async fn connect(&self) -> Result<SqliteConnection, StorageError> {
        Ok(self.options.connect().await?)
    }
}

/// Close a request-scoped connection.
///
/// A failed close is logged rather than returned: the request's own outcome
/// has already been decided and the connection is gone either way.
pub(crate) async fn release(conn: SqliteConnection) {
    if let Err(err) = conn.close().await {
        tracing::warn!(error = %err, "failed to close sqlite connection");
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
