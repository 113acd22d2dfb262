//! Validated shortcut key.

use super::EndpointDomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// The key typed after `/` to address a configured endpoint.
///
/// Shortcuts are matched case-sensitively and never carry the leading
/// slash (`j`, `search`, `ddg`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Shortcut(String);

impl Shortcut {
    /// Creates a validated shortcut.
    ///
    /// The input is trimmed. Case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError::EmptyShortcut`] when the value is empty
    /// after trimming, or [`EndpointDomainError::InvalidShortcut`] when it
    /// contains whitespace or starts with `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, EndpointDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(EndpointDomainError::EmptyShortcut);
        }

        if normalized.starts_with('/') || normalized.chars().any(char::is_whitespace) {
            return Err(EndpointDomainError::InvalidShortcut(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the shortcut as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Shortcut {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Shortcut {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Shortcut {
    type Error = EndpointDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Shortcut> for String {
    fn from(value: Shortcut) -> Self {
        value.0
    }
}
