//! Typed identifier newtypes backed by `SQLite` row ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a row id assigned by the store.
            #[must_use]
            pub fn from_i64(value: i64) -> Self {
                Self(value)
            }

            /// Access the inner row id.
            #[must_use]
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Server-assigned identifier of a [`Record`](crate::record::Record).
    ///
    /// Assigned by the store on insert, strictly increasing, never reused.
    RecordId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = RecordId::from_i64(42);
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_bare_integer() {
        let json = serde_json::to_string(&RecordId::from_i64(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn should_order_by_inner_value() {
        assert!(RecordId::from_i64(1) < RecordId::from_i64(2));
    }

    #[test]
    fn should_return_error_when_parsing_non_integer() {
        assert!(RecordId::from_str("abc").is_err());
    }
}
