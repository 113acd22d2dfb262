//! Endpoint handler port.
//!
//! Each endpoint type is served by one [`EndpointHandler`]. Handlers only
//! implement the backend search; the fixed decision sequence around it
//! (usage help on an empty or `help` query, the per-call time bound) lives
//! in [`EndpointHandlerExt::handle_request`] so every handler gets the same
//! behaviour.

use crate::endpoint::domain::{
    ClassifiedError, EndpointConfig, EndpointOutcome, EndpointResult, EndpointType, Shortcut,
};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Upper bound for one handler call unless the handler overrides it.
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(15);

/// Backend-specific request/response adapter for one endpoint type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EndpointHandler: Send + Sync {
    /// Returns the endpoint type this handler serves.
    fn endpoint_type(&self) -> EndpointType;

    /// Renders usage help for the invoking shortcut.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifiedError`] when the help text cannot be rendered.
    fn usage(&self, shortcut: &Shortcut) -> EndpointOutcome<String>;

    /// Returns the bound applied to one [`EndpointHandler::search`] call.
    fn timeout(&self) -> Duration {
        DEFAULT_HANDLER_TIMEOUT
    }

    /// Returns the URL probed by connectivity checks.
    ///
    /// Defaults to the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifiedError`] when the probe URL cannot be derived.
    fn reachability_url(&self, config: &EndpointConfig) -> EndpointOutcome<Url> {
        Ok(config.base_url().clone())
    }

    /// Runs a non-empty query against the backend and normalizes the answer.
    ///
    /// Zero matches must be reported as `Ok` with guidance, never as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifiedError`] for transport, authorization, server or
    /// payload failures.
    async fn search(
        &self,
        query: &str,
        config: &EndpointConfig,
        shortcut: &Shortcut,
    ) -> EndpointOutcome<EndpointResult>;
}

/// Entry point shared by every handler.
#[async_trait]
pub trait EndpointHandlerExt: EndpointHandler {
    /// Handles a routed query.
    ///
    /// An empty query, or `help` in any case, yields usage text. Anything
    /// else is searched, and a search still pending after
    /// [`EndpointHandler::timeout`] resolves as [`ErrorKind::Timeout`].
    ///
    /// [`ErrorKind::Timeout`]: crate::endpoint::domain::ErrorKind::Timeout
    ///
    /// # Errors
    ///
    /// Returns the handler's [`ClassifiedError`] unchanged, or a timeout
    /// error.
    async fn handle_request(
        &self,
        query: &str,
        config: &EndpointConfig,
        shortcut: &Shortcut,
    ) -> EndpointOutcome<EndpointResult>;
}

#[async_trait]
impl<H> EndpointHandlerExt for H
where
    H: EndpointHandler + ?Sized,
{
    async fn handle_request(
        &self,
        query: &str,
        config: &EndpointConfig,
        shortcut: &Shortcut,
    ) -> EndpointOutcome<EndpointResult> {
        let trimmed = query.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("help") {
            let usage = self.usage(shortcut)?;
            return Ok(EndpointResult::new(
                usage,
                self.endpoint_type(),
                shortcut.clone(),
            ));
        }

        let bound = self.timeout();
        tokio::time::timeout(bound, self.search(trimmed, config, shortcut))
            .await
            .unwrap_or_else(|_| {
                tracing::warn!(
                    shortcut = %shortcut,
                    endpoint_type = %self.endpoint_type(),
                    timeout = ?bound,
                    "endpoint search timed out"
                );
                Err(ClassifiedError::timeout(format!(
                    "{} did not respond within {bound:?}. Check that the service is running and \
                     reachable, then try again.",
                    config.display_name(),
                )))
            })
    }
}
