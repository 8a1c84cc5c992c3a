//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// UTC timestamp assigned to every stored record.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp as fixed-width ISO-8601 with microseconds and a `Z`
/// suffix, e.g. `2024-05-01T08:30:00.000000Z`.
///
/// Every stored timestamp has the same width, so ordering the text column
/// orders the instants.
#[must_use]
pub fn format(timestamp: &Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 with any offset, and offset-less ISO-8601 values
/// (`2024-05-01T08:30:00.123456`) which are taken as UTC.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when the text matches neither form.
pub fn parse(value: &str) -> Result<Timestamp, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.to_utc()),
        Err(err) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| err),
    }
}

/// Serde adapter writing timestamps in the stored [`format`].
pub mod iso8601 {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    /// Serialize with [`super::format`].
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(value))
    }

    /// Deserialize with [`super::parse`].
    ///
    /// # Errors
    ///
    /// Fails when the string is not a recognised timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse(&value).map_err(serde::de::Error::custom)
    }
}
