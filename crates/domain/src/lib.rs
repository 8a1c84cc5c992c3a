//! # rfid-api-domain
//!
//! Pure domain model for the RFID ingestion service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Records** (one stored scan: id, JSON payload, timestamp)
//! - Define **Payloads** (the opaque JSON value a reader posts)
//! - Define **Pages** (offset-based slices with pagination metadata)
//! - Define the **API key** credential and its comparison rule
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod auth;
pub mod page;
pub mod record;
