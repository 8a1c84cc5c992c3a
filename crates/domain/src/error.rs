//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`RfidError`]
//! via `#[from]` or an explicit `From` impl.

/// Top-level error returned by application services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum RfidError {
    /// Input failed a domain invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The storage backend failed. The adapter's error is kept as the source.
    #[error(transparent)]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Input rejected before it reaches storage.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The request body is not a JSON document.
    #[error("{0}")]
    InvalidJson(#[source] serde_json::Error),

    /// `page` was zero or negative.
    #[error("page must be a positive integer, got {0}")]
    NonPositivePage(i64),

    /// `per_page` was zero or negative.
    #[error("per_page must be a positive integer, got {0}")]
    NonPositivePerPage(i64),

    /// `(page - 1) * per_page` does not fit in a signed 64-bit offset.
    #[error("page {page} with per_page {per_page} is out of range")]
    PageOutOfRange {
        /// Requested page number.
        page: i64,
        /// Requested page size.
        per_page: i64,
    },

    /// The configured API key is empty.
    #[error("API key must not be empty")]
    EmptyApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_validation_message_without_prefix() {
        let err: RfidError = ValidationError::NonPositivePage(0).into();
        assert_eq!(err.to_string(), "page must be a positive integer, got 0");
    }

    #[test]
    fn should_pass_json_error_message_through() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = source.to_string();
        let err = RfidError::from(ValidationError::InvalidJson(source));
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn should_pass_storage_message_through() {
        let source = std::io::Error::other("database is locked");
        let err = RfidError::Storage(Box::new(source));
        assert_eq!(err.to_string(), "database is locked");
    }
}
