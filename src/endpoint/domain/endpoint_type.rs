//! Endpoint type tags used to select a handler.

use super::EndpointDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of backend an endpoint targets.
///
/// The three built-in types have handlers shipped with the crate.
/// [`EndpointType::Generic`] and [`EndpointType::Extension`] are extension
/// points: routing to them only succeeds once a handler is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EndpointType {
    /// Media catalogue search (Jellyseerr style).
    MediaSearch,
    /// Metasearch engine (SearXNG style).
    WebSearch,
    /// Instant answers (DuckDuckGo style).
    InstantAnswer,
    /// User-defined endpoint without a built-in handler.
    Generic,
    /// Any other registered type tag.
    Extension(String),
}

impl EndpointType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::MediaSearch => "media_search",
            Self::WebSearch => "web_search",
            Self::InstantAnswer => "instant_answer",
            Self::Generic => "generic",
            Self::Extension(tag) => tag,
        }
    }

    /// Returns the friendly backend name shown above handler output.
    ///
    /// Returns `None` for types without a well-known backend.
    #[must_use]
    pub const fn friendly_name(&self) -> Option<&'static str> {
        match self {
            Self::MediaSearch => Some("Jellyseerr"),
            Self::WebSearch => Some("SearXNG"),
            Self::InstantAnswer => Some("DuckDuckGo"),
            Self::Generic | Self::Extension(_) => None,
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EndpointType {
    type Error = EndpointDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "media_search" => Ok(Self::MediaSearch),
            "web_search" => Ok(Self::WebSearch),
            "instant_answer" => Ok(Self::InstantAnswer),
            "generic" | "custom" => Ok(Self::Generic),
            "" => Err(EndpointDomainError::InvalidEndpointType(value.to_owned())),
            tag if tag
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') =>
            {
                Ok(Self::Extension(tag.to_owned()))
            }
            _ => Err(EndpointDomainError::InvalidEndpointType(value.to_owned())),
        }
    }
}

impl TryFrom<String> for EndpointType {
    type Error = EndpointDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<EndpointType> for String {
    fn from(value: EndpointType) -> Self {
        value.as_str().to_owned()
    }
}
