//! Normalized handler output.

use super::{EndpointType, Shortcut};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structured facts attached to a result (counts, echoed query, paging).
///
/// Ordered so rendering is deterministic.
pub type EndpointMetadata = BTreeMap<String, Value>;

/// The uniform shape every handler returns on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResult {
    content: String,
    endpoint_type: EndpointType,
    shortcut: Shortcut,
    metadata: Option<EndpointMetadata>,
}

impl EndpointResult {
    /// Creates a result without metadata.
    #[must_use]
    pub fn new(content: impl Into<String>, endpoint_type: EndpointType, shortcut: Shortcut) -> Self {
        Self {
            content: content.into(),
            endpoint_type,
            shortcut,
            metadata: None,
        }
    }

    /// Adds one metadata entry, creating the map on first use.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Returns the human-readable body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the type of the endpoint that produced the result.
    #[must_use]
    pub const fn endpoint_type(&self) -> &EndpointType {
        &self.endpoint_type
    }

    /// Returns the shortcut that was invoked.
    #[must_use]
    pub const fn shortcut(&self) -> &Shortcut {
        &self.shortcut
    }

    /// Returns the metadata map, if any entries were recorded.
    #[must_use]
    pub const fn metadata(&self) -> Option<&EndpointMetadata> {
        self.metadata.as_ref()
    }
}
