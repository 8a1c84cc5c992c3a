//! # rfid-api-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `RecordRepository` port defined in `rfid-api-app::ports::storage`
//! - Open one connection per repository call (no pooling)
//! - Run the embedded migration that creates the `rfid_data` table
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `rfid-api-app` (for port traits) and `rfid-api-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod database;
pub mod error;
pub mod record_repo;

pub use database::{Config, Database};
pub use error::StorageError;
pub use record_repo::SqliteRecordRepository;
