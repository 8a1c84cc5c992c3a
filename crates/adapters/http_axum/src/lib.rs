//! # rfid-api-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API for RFID readers:
//!   - `POST /rfid` — store any JSON document
//!   - `GET  /rfid?page=&per_page=` — page through stored records, newest first
//! - Reject requests without the shared `X-API-Key` before any parsing
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! ## Dependency rule
//! Depends on `rfid-api-app` (for port traits and services) and `rfid-api-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod auth;
pub mod error;
pub mod router;
pub mod state;
