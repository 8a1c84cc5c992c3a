//! # rfid-api-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RecordRepository` — append records, read a page newest-first
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RecordService` — ingest a payload, list a page of records
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `rfid-api-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
