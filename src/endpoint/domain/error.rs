//! Error types for endpoint domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing endpoint domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointDomainError {
    /// The shortcut is empty after trimming.
    #[error("shortcut must not be empty")]
    EmptyShortcut,

    /// The shortcut contains whitespace or starts with `/`.
    #[error("shortcut '{0}' must be a single token without a leading '/'")]
    InvalidShortcut(String),

    /// The display name is empty after trimming.
    #[error("endpoint name must not be empty")]
    EmptyDisplayName,

    /// The base URL is empty after trimming.
    #[error("endpoint URL must not be empty")]
    EmptyBaseUrl,

    /// The base URL does not parse as an absolute URL.
    #[error("endpoint URL '{0}' is not a valid absolute URL")]
    InvalidBaseUrl(String),

    /// The base URL uses a scheme other than `http` or `https`.
    #[error("endpoint URL '{url}' must use http or https, not '{scheme}'")]
    UnsupportedScheme {
        /// The rejected URL.
        url: String,
        /// The scheme that was found.
        scheme: String,
    },

    /// The endpoint type string is not a usable identifier.
    #[error(
        "endpoint type '{0}' is invalid (only lowercase alphanumeric and underscores allowed)"
    )]
    InvalidEndpointType(String),

    /// The endpoint type has no registered handler.
    #[error("endpoint type '{0}' has no registered handler")]
    UnsupportedEndpointType(String),

    /// A routed message does not start with `/`.
    #[error("custom endpoint messages must start with '/'")]
    MissingLeadingSlash,
}
