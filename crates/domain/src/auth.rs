//! Shared-secret credential checked on every `/rfid` request.

use std::fmt;

use subtle::ConstantTimeEq;

use crate::error::ValidationError;

/// The static API key clients must present.
///
/// Never empty. `Debug` does not print the secret.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a configured secret.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyApiKey`] when `secret` is empty, so an
    /// unset key can never authorize every request.
    pub fn new(secret: impl Into<String>) -> Result<Self, ValidationError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        Ok(Self(secret))
    }

    /// Check a presented credential.
    ///
    /// Absent or empty credentials are rejected. The byte comparison runs in
    /// constant time with respect to the content.
    #[must_use]
    pub fn verify(&self, presented: Option<&[u8]>) -> bool {
        match presented {
            Some(candidate) if !candidate.is_empty() => {
                self.0.as_bytes().ct_eq(candidate).into()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ApiKey {
        ApiKey::new("secret").unwrap()
    }

    #[test]
    fn should_accept_exact_match() {
        assert!(key().verify(Some(b"secret")));
    }

    #[test]
    fn should_reject_missing_credential() {
        assert!(!key().verify(None));
    }

    #[test]
    fn should_reject_empty_credential() {
        assert!(!key().verify(Some(b"")));
    }

    #[test]
    fn should_be_case_sensitive() {
        assert!(!key().verify(Some(b"SECRET")));
    }

    #[test]
    fn should_reject_prefix_and_extension() {
        assert!(!key().verify(Some(b"secre")));
        assert!(!key().verify(Some(b"secret-x")));
    }

    #[test]
    fn should_refuse_empty_secret() {
        assert!(matches!(ApiKey::new(""), Err(ValidationError::EmptyApiKey)));
    }

    #[test]
    fn should_not_leak_secret_in_debug_output() {
        assert_eq!(format!("{:?}", key()), "ApiKey(<redacted>)");
    }
}
