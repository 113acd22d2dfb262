//! Endpoint configuration records.

use super::{EndpointDomainError, EndpointType, Shortcut};
use reqwest::Url;
use std::fmt;

/// A validated configuration entry mapping a shortcut to a backend.
///
/// Instances are only produced through [`EndpointConfig::new`] or
/// [`EndpointConfigDraft::validate`], so the base URL is always an absolute
/// `http`/`https` URL and an API key, when present, is never blank.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    shortcut: Shortcut,
    display_name: String,
    endpoint_type: EndpointType,
    base_url: Url,
    api_key: Option<String>,
}

impl EndpointConfig {
    /// Creates a validated endpoint configuration without an API key.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError::EmptyDisplayName`] when the name is
    /// blank, or one of the URL variants when `raw_base_url` is empty, not an
    /// absolute URL, or not `http`/`https`.
    pub fn new(
        shortcut: Shortcut,
        raw_display_name: impl Into<String>,
        endpoint_type: EndpointType,
        raw_base_url: &str,
    ) -> Result<Self, EndpointDomainError> {
        let display_name = raw_display_name.into().trim().to_owned();
        if display_name.is_empty() {
            return Err(EndpointDomainError::EmptyDisplayName);
        }

        Ok(Self {
            shortcut,
            display_name,
            endpoint_type,
            base_url: parse_base_url(raw_base_url)?,
            api_key: None,
        })
    }

    /// Sets the API key. Blank keys are normalized to absent.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = normalize_api_key(Some(api_key.into()));
        self
    }

    /// Returns the shortcut key.
    #[must_use]
    pub const fn shortcut(&self) -> &Shortcut {
        &self.shortcut
    }

    /// Returns the human-readable endpoint name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the endpoint type used to select a handler.
    #[must_use]
    pub const fn endpoint_type(&self) -> &EndpointType {
        &self.endpoint_type
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the API key, if one is configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("shortcut", &self.shortcut)
            .field("display_name", &self.display_name)
            .field("endpoint_type", &self.endpoint_type)
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Unvalidated endpoint settings as entered in the settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfigDraft {
    shortcut: String,
    name: String,
    url: String,
    endpoint_type: Option<String>,
    api_key: Option<String>,
}

impl EndpointConfigDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(
        shortcut: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            shortcut: shortcut.into(),
            name: name.into(),
            url: url.into(),
            endpoint_type: None,
            api_key: None,
        }
    }

    /// Sets the endpoint type tag (`media_search`, `web_search`, ...).
    #[must_use]
    pub fn with_type(mut self, endpoint_type: impl Into<String>) -> Self {
        self.endpoint_type = Some(endpoint_type.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns the raw shortcut.
    #[must_use]
    pub fn shortcut(&self) -> &str {
        &self.shortcut
    }

    /// Returns the raw endpoint type tag, if one was given.
    #[must_use]
    pub fn endpoint_type(&self) -> Option<&str> {
        self.endpoint_type.as_deref()
    }

    /// Validates the draft into an [`EndpointConfig`].
    ///
    /// A missing type defaults to [`EndpointType::Generic`]. An empty API key
    /// is treated as absent rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError`] when any field fails validation.
    pub fn validate(self) -> Result<EndpointConfig, EndpointDomainError> {
        let Self {
            shortcut,
            name,
            url,
            endpoint_type,
            api_key,
        } = self;

        let resolved_type = match endpoint_type {
            Some(tag) => EndpointType::try_from(tag.as_str())?,
            None => EndpointType::Generic,
        };

        let mut config =
            EndpointConfig::new(Shortcut::new(shortcut)?, name, resolved_type, &url)?;
        config.api_key = normalize_api_key(api_key);
        Ok(config)
    }
}

impl From<&EndpointConfig> for EndpointConfigDraft {
    fn from(config: &EndpointConfig) -> Self {
        Self {
            shortcut: config.shortcut.as_str().to_owned(),
            name: config.display_name.clone(),
            url: config.base_url.as_str().to_owned(),
            endpoint_type: Some(config.endpoint_type.as_str().to_owned()),
            api_key: config.api_key.clone(),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, EndpointDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EndpointDomainError::EmptyBaseUrl);
    }

    let url =
        Url::parse(trimmed).map_err(|_| EndpointDomainError::InvalidBaseUrl(trimmed.to_owned()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(EndpointDomainError::InvalidBaseUrl(trimmed.to_owned())),
        scheme => Err(EndpointDomainError::UnsupportedScheme {
            url: trimmed.to_owned(),
            scheme: scheme.to_owned(),
        }),
    }
}

fn normalize_api_key(api_key: Option<String>) -> Option<String> {
    api_key
        .map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty())
}
