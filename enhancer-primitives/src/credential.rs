//! API credential wrapper.

use std::fmt;

use crate::error::{Error, Result};

/// API key for the remote text-generation service.
///
/// Held in memory for the lifetime of the value only. The secret never shows
/// up in `Debug` or `Display` output, so a credential can travel through
/// structured logs without leaking.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps an API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredential`] if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::InvalidCredential {
                reason: "API key cannot be empty".into(),
            });
        }
        Ok(Self(key))
    }

    /// Returns the raw key for placing on an outbound request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl TryFrom<String> for Credential {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}
