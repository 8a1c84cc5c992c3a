//! Record — one stored RFID scan event.
//!
//! A reader posts an arbitrary JSON document. The service stamps it with the
//! current UTC time and the store assigns the id. Records are append-only:
//! nothing in the system updates or deletes them.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::RecordId;
use crate::time::Timestamp;

/// The opaque JSON document carried by a record.
///
/// Any JSON value is accepted: object, array, string, number, boolean or
/// `null`. The shape is never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(serde_json::Value);

impl Payload {
    /// Parse a request body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJson`] when `bytes` is not a single
    /// well-formed JSON value.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        serde_json::from_slice(bytes)
            .map(Self)
            .map_err(ValidationError::InvalidJson)
    }

    /// Serialize to the compact JSON text that is persisted.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        // Serializing a `Value` to a `String` has no failure path.
        self.0.to_string()
    }

    /// Borrow the inner JSON value.
    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Take the inner JSON value.
    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// A record that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub data: Payload,
    pub timestamp: Timestamp,
}

impl NewRecord {
    /// Stamp a payload with its ingestion time.
    #[must_use]
    pub fn new(data: Payload, timestamp: Timestamp) -> Self {
        Self { data, timestamp }
    }

    /// Attach the id the store assigned, producing the stored [`Record`].
    #[must_use]
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            data: self.data,
            timestamp: self.timestamp,
        }
    }
}

/// A stored scan event as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub data: Payload,
    #[serde(with = "crate::time::iso8601")]
    pub timestamp: Timestamp,
}
