//! Shortcut router.
//!
//! Provides [`EndpointRouter`], which recognizes `/<shortcut> <query>`
//! messages, resolves the shortcut against the configuration store on every
//! call, and dispatches the query to the handler registered for the
//! endpoint's type.

use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::endpoint::{
    adapters::handlers::{InstantAnswerHandler, MediaSearchHandler, WebSearchHandler},
    domain::{
        ClassifiedError, EndpointConfig, EndpointConfigDraft, EndpointDomainError,
        EndpointOutcome, EndpointResult, EndpointType, ErrorKind, ParsedCommand,
    },
    ports::{EndpointConfigStore, EndpointHandler, EndpointHandlerExt},
};

/// Time bound for connectivity probes.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

type HandlerRegistry = HashMap<EndpointType, Arc<dyn EndpointHandler>>;

/// Routes shortcut messages to endpoint handlers.
///
/// The router holds no per-message state. Configuration is read from the
/// store on each call, so edits made between messages take effect
/// immediately.
#[derive(Clone)]
pub struct EndpointRouter<S>
where
    S: EndpointConfigStore,
{
    store: Arc<S>,
    handlers: Arc<RwLock<HandlerRegistry>>,
    probe_client: Client,
    probe_timeout: Duration,
}

impl<S> EndpointRouter<S>
where
    S: EndpointConfigStore,
{
    /// Creates a router with an empty handler registry.
    #[must_use]
    pub fn new(store: Arc<S>, probe_client: Client) -> Self {
        Self {
            store,
            handlers: Arc::new(RwLock::new(HashMap::new())),
            probe_client,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Creates a router with the media search, web search and instant
    /// answer handlers registered, all sharing `client`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifiedError`] when a built-in handler cannot be built.
    pub fn with_builtin_handlers(store: Arc<S>, client: Client) -> EndpointOutcome<Self> {
        let router = Self::new(store, client.clone());
        router.register_handler(
            EndpointType::MediaSearch,
            Arc::new(MediaSearchHandler::new(client.clone())),
        );
        router.register_handler(
            EndpointType::WebSearch,
            Arc::new(WebSearchHandler::new(client.clone())),
        );
        router.register_handler(
            EndpointType::InstantAnswer,
            Arc::new(InstantAnswerHandler::new(client)?),
        );
        Ok(router)
    }

    /// Overrides the connectivity probe time bound.
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Registers `handler` for `endpoint_type`, replacing any previous one.
    pub fn register_handler(
        &self,
        endpoint_type: EndpointType,
        handler: Arc<dyn EndpointHandler>,
    ) {
        tracing::debug!(endpoint_type = %endpoint_type, "registering endpoint handler");
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        if handlers.insert(endpoint_type, handler).is_some() {
            tracing::debug!("replaced previous endpoint handler");
        }
    }

    /// Lists endpoint types that currently have a handler, sorted.
    #[must_use]
    pub fn registered_types(&self) -> Vec<EndpointType> {
        let mut types: Vec<EndpointType> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        types.sort();
        types
    }

    /// Returns whether `message` addresses a configured shortcut.
    ///
    /// True only when the trimmed message starts with `/` and the token up
    /// to the first whitespace exactly matches a configured shortcut.
    #[must_use]
    pub fn has_shortcut(&self, message: &str) -> bool {
        let Some(body) = message.trim().strip_prefix('/') else {
            return false;
        };
        let Some(token) = body.split(char::is_whitespace).next() else {
            return false;
        };
        if token.is_empty() {
            return false;
        }

        match self.store.find_by_shortcut(token) {
            Ok(found) => found.is_some(),
            Err(error) => {
                tracing::warn!(shortcut = token, %error, "endpoint store lookup failed");
                false
            }
        }
    }

    /// Splits a shortcut message into shortcut and query.
    ///
    /// Callers are expected to check [`EndpointRouter::has_shortcut`] first.
    ///
    /// # Errors
    ///
    /// Returns a [`ErrorKind::Validation`] error when the message does not
    /// start with `/`.
    #[expect(
        clippy::unused_self,
        reason = "parsing is part of the router's public routing contract"
    )]
    pub fn parse_message(&self, message: &str) -> EndpointOutcome<ParsedCommand> {
        Ok(ParsedCommand::parse(message)?)
    }

    /// Routes a chat message to its endpoint handler.
    ///
    /// Handler failures are returned unchanged. The router itself only
    /// reports [`ErrorKind::NotFound`] for unmatched shortcuts or types and
    /// [`ErrorKind::Unknown`] for store failures or a crashed handler.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifiedError`] when no endpoint matches or the handler
    /// fails.
    pub async fn route_request(&self, message: &str) -> EndpointOutcome<EndpointResult> {
        if !self.has_shortcut(message) {
            return Err(ClassifiedError::not_found(
                "no custom endpoint matches this message",
            ));
        }

        let (shortcut, query) = self.parse_message(message)?.into_parts();
        let config = self
            .store
            .find_by_shortcut(&shortcut)
            .map_err(|error| {
                tracing::warn!(shortcut = %shortcut, %error, "endpoint store lookup failed");
                ClassifiedError::from(error)
            })?
            .ok_or_else(|| {
                ClassifiedError::not_found(format!(
                    "no custom endpoint is configured for /{shortcut}"
                ))
            })?;

        let handler = self.handler_for(config.endpoint_type()).ok_or_else(|| {
            tracing::warn!(
                shortcut = %shortcut,
                endpoint_type = %config.endpoint_type(),
                "no handler registered for endpoint type"
            );
            ClassifiedError::not_found(format!(
                "unsupported endpoint type '{}' for /{shortcut}",
                config.endpoint_type()
            ))
        })?;

        tracing::debug!(
            shortcut = %shortcut,
            endpoint_type = %config.endpoint_type(),
            "dispatching to endpoint handler"
        );
        dispatch(handler, query, config).await
    }

    /// Checks whether the endpoint's server answers at all.
    ///
    /// Any HTTP status below 500 counts as reachable, including auth
    /// rejections. Connection failures, DNS errors and timeouts yield
    /// `Ok(false)` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifiedError`] only when the handler cannot derive a
    /// probe URL from the configuration.
    pub async fn test_endpoint(&self, config: &EndpointConfig) -> EndpointOutcome<bool> {
        let url = match self.handler_for(config.endpoint_type()) {
            Some(handler) => handler.reachability_url(config)?,
            None => config.base_url().clone(),
        };

        match self
            .probe_client
            .get(url.clone())
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                let reachable = !status.is_server_error();
                tracing::debug!(url = %url, status = status.as_u16(), reachable, "probed endpoint");
                Ok(reachable)
            }
            Err(error) => {
                tracing::warn!(url = %url, %error, "endpoint unreachable");
                Ok(false)
            }
        }
    }

    /// Validates settings-form input into an [`EndpointConfig`].
    ///
    /// Requires a display name and an absolute `http`/`https` URL. A type,
    /// when given, must have a registered handler. An empty API key is
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// Returns a [`ErrorKind::Validation`] error describing the first
    /// invalid field.
    pub fn validate_endpoint_config(
        &self,
        draft: EndpointConfigDraft,
    ) -> EndpointOutcome<EndpointConfig> {
        let type_specified = draft.endpoint_type().is_some();
        let config = draft.validate()?;

        if type_specified && self.handler_for(config.endpoint_type()).is_none() {
            return Err(EndpointDomainError::UnsupportedEndpointType(
                config.endpoint_type().to_string(),
            )
            .into());
        }
        Ok(config)
    }

    fn handler_for(&self, endpoint_type: &EndpointType) -> Option<Arc<dyn EndpointHandler>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(endpoint_type)
            .cloned()
    }
}

/// Runs the handler on its own task so a panicking handler surfaces as a
/// classified error instead of unwinding into the caller.
async fn dispatch(
    handler: Arc<dyn EndpointHandler>,
    query: String,
    config: EndpointConfig,
) -> EndpointOutcome<EndpointResult> {
    let task = tokio::spawn(async move {
        handler
            .handle_request(&query, &config, config.shortcut())
            .await
    });

    match task.await {
        Ok(outcome) => outcome,
        Err(error) if error.is_panic() => {
            tracing::warn!("endpoint handler panicked");
            Err(ClassifiedError::unknown(
                "the endpoint handler failed unexpectedly",
            ))
        }
        Err(_) => Err(ClassifiedError::new(
            ErrorKind::Cancelled,
            "the endpoint request was cancelled",
        )),
    }
}
