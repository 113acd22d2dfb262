//! Configuration store port.
//!
//! The router re-reads the store on every dispatch, so implementations must
//! hand out consistent snapshots while the settings UI edits entries.

use crate::endpoint::domain::{ClassifiedError, EndpointConfig, ErrorKind, Shortcut};
use std::sync::Arc;
use thiserror::Error;

/// Result type for configuration store operations.
pub type EndpointStoreResult<T> = Result<T, EndpointStoreError>;

/// Read access to the shortcut-to-endpoint mapping.
pub trait EndpointConfigStore: Send + Sync {
    /// Finds the configuration for a shortcut (exact, case-sensitive match).
    ///
    /// Returns `None` when the shortcut is not configured.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError`] when the store cannot be read.
    fn find_by_shortcut(&self, shortcut: &str) -> EndpointStoreResult<Option<EndpointConfig>>;

    /// Lists every configured endpoint ordered by shortcut.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointStoreError`] when the store cannot be read.
    fn list(&self) -> EndpointStoreResult<Vec<EndpointConfig>>;
}

/// Errors returned by configuration store implementations.
#[derive(Debug, Clone, Error)]
pub enum EndpointStoreError {
    /// An endpoint with the same shortcut already exists.
    #[error("an endpoint with shortcut '/{0}' already exists")]
    DuplicateShortcut(Shortcut),

    /// No endpoint is configured for the shortcut.
    #[error("no endpoint is configured for shortcut '/{0}'")]
    NotFound(Shortcut),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted endpoint data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// The store is temporarily unusable (poisoned lock, closed handle).
    #[error("endpoint store unavailable: {0}")]
    Unavailable(String),

    /// Persistence-layer failure.
    #[error("endpoint persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EndpointStoreError {
    /// Wraps a data-quality or deserialization error from persisted data.
    #[must_use]
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<EndpointStoreError> for ClassifiedError {
    fn from(error: EndpointStoreError) -> Self {
        let message = error.to_string();
        match error {
            EndpointStoreError::DuplicateShortcut(_) => Self::new(ErrorKind::Conflict, message),
            EndpointStoreError::NotFound(_) => Self::not_found(message),
            EndpointStoreError::InvalidPersistedData(_) => Self::serialization(message),
            EndpointStoreError::Unavailable(_) | EndpointStoreError::Persistence(_) => {
                Self::unknown(message)
            }
        }
    }
}
