//! Serialized form of the endpoint settings file.

use crate::endpoint::domain::{
    EndpointConfig, EndpointConfigDraft, EndpointDomainError, EndpointType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole settings file keyed by shortcut.
pub(super) type EndpointFile = BTreeMap<String, PersistedEndpoint>;

/// One persisted endpoint entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct PersistedEndpoint {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl PersistedEndpoint {
    /// Validates the entry stored under `shortcut`.
    pub fn into_config(self, shortcut: &str) -> Result<EndpointConfig, EndpointDomainError> {
        let mut draft = EndpointConfigDraft::new(shortcut, self.name, self.url);
        if let Some(tag) = self.endpoint_type {
            draft = draft.with_type(tag);
        }
        if let Some(key) = self.api_key {
            draft = draft.with_api_key(key);
        }
        draft.validate()
    }
}

impl From<&EndpointConfig> for PersistedEndpoint {
    fn from(config: &EndpointConfig) -> Self {
        let endpoint_type = match config.endpoint_type() {
            EndpointType::Generic => "custom".to_owned(),
            other => other.as_str().to_owned(),
        };
        Self {
            name: config.display_name().to_owned(),
            url: config.base_url().as_str().to_owned(),
            endpoint_type: Some(endpoint_type),
            api_key: Some(config.api_key().unwrap_or_default().to_owned()),
        }
    }
}
