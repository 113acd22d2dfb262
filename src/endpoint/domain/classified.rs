//! Uniform error model returned by every routing operation.

use super::EndpointDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for routing and handler operations.
pub type EndpointOutcome<T> = Result<T, ClassifiedError>;

/// Failure category of a [`ClassifiedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The backend could not be reached or answered with an unexpected status.
    Network,
    /// The backend did not answer within the call bound.
    Timeout,
    /// The input or configuration is malformed.
    Validation,
    /// The backend rejected the credentials (HTTP 401).
    Unauthorized,
    /// The backend refused the request (HTTP 403).
    Forbidden,
    /// No endpoint, handler or backend resource matched.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// The backend is throttling requests (HTTP 429).
    RateLimited,
    /// The call was cancelled before completing.
    Cancelled,
    /// A payload could not be encoded or decoded.
    Serialization,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Validation => "validation",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::RateLimited => "rate_limited",
            Self::Cancelled => "cancelled",
            Self::Serialization => "serialization",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing failure with its category and optional HTTP status.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ClassifiedError {
    message: String,
    kind: ErrorKind,
    status_code: Option<u16>,
}

impl ClassifiedError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            status_code: None,
        }
    }

    /// Attaches the HTTP status the error was derived from.
    #[must_use]
    pub const fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Creates a [`ErrorKind::Network`] error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Creates a [`ErrorKind::Timeout`] error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates a [`ErrorKind::Validation`] error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates a [`ErrorKind::NotFound`] error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a [`ErrorKind::Serialization`] error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// Creates a [`ErrorKind::Unknown`] error.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// Returns the user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status, when the error came from a response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

impl From<EndpointDomainError> for ClassifiedError {
    fn from(error: EndpointDomainError) -> Self {
        Self::validation(error.to_string())
    }
}
