//! Instant answer handler (DuckDuckGo Instant Answer API).
//!
//! The API lives at a fixed address and needs no key, so the configured base
//! URL and API key are ignored. It answers almost every well-formed request
//! with `200`, which leaves transport failures as the realistic error cases.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{
    http::{read_json, send},
    usage::render_usage,
};
use crate::endpoint::{
    domain::{
        ClassifiedError, EndpointConfig, EndpointOutcome, EndpointResult, EndpointType, Shortcut,
    },
    ports::{DEFAULT_HANDLER_TIMEOUT, EndpointHandler},
};

/// Public Instant Answer API endpoint.
pub const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";

const SERVICE: &str = "DuckDuckGo";
const RELATED_TOPIC_LIMIT: usize = 3;

const USAGE: &str = "\
**Instant answers** from DuckDuckGo: summaries, definitions and quick \
calculations.

Usage: `/{{ shortcut }} <question or topic>`

Examples:
- `/{{ shortcut }} Rust programming language`
- `/{{ shortcut }} define serendipity`
- `/{{ shortcut }} 10 miles in km`

Instant answers cover well-known topics; use a web search endpoint for \
everything else.";

/// Queries the DuckDuckGo Instant Answer API.
#[derive(Debug, Clone)]
pub struct InstantAnswerHandler {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl InstantAnswerHandler {
    /// Creates a handler targeting [`DUCKDUCKGO_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`ClassifiedError`] with kind `validation` if the built-in
    /// endpoint constant fails to parse.
    pub fn new(client: Client) -> EndpointOutcome<Self> {
        let endpoint = Url::parse(DUCKDUCKGO_API_URL).map_err(|err| {
            ClassifiedError::validation(format!("invalid instant answer endpoint: {err}"))
        })?;
        Ok(Self {
            client,
            endpoint,
            timeout: DEFAULT_HANDLER_TIMEOUT,
        })
    }

    /// Points the handler at another Instant Answer compatible endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Overrides the per-call time bound.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl EndpointHandler for InstantAnswerHandler {
    fn endpoint_type(&self) -> EndpointType {
        EndpointType::InstantAnswer
    }

    fn usage(&self, shortcut: &Shortcut) -> EndpointOutcome<String> {
        render_usage(USAGE, shortcut)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn reachability_url(&self, _config: &EndpointConfig) -> EndpointOutcome<Url> {
        Ok(self.endpoint.clone())
    }

    async fn search(
        &self,
        query: &str,
        _config: &EndpointConfig,
        shortcut: &Shortcut,
    ) -> EndpointOutcome<EndpointResult> {
        let request = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .timeout(self.timeout);

        tracing::debug!(shortcut = %shortcut, query, "requesting instant answer");
        let response = send(request, SERVICE).await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "instant answer request rejected");
            return Err(ClassifiedError::network(format!(
                "{SERVICE} returned status {}. Try again in a moment.",
                status.as_u16()
            ))
            .with_status(status.as_u16()));
        }

        let payload: InstantAnswer = read_json(response, SERVICE).await?;
        Ok(build_result(query, &payload, shortcut))
    }
}

fn build_result(query: &str, payload: &InstantAnswer, shortcut: &Shortcut) -> EndpointResult {
    let mut sections = Vec::new();

    if let Some(answer) = payload.answer_text() {
        sections.push(format!("**Answer:** {answer}"));
    }
    if let Some(summary) = non_empty(&payload.abstract_text) {
        let heading = non_empty(&payload.heading).unwrap_or(query);
        let mut section = format!("**{heading}**\n{summary}");
        if let Some(source) = non_empty(&payload.abstract_source) {
            section.push_str(&source_line(source, &payload.abstract_url));
        }
        sections.push(section);
    }
    if let Some(definition) = non_empty(&payload.definition) {
        let mut section = format!("**Definition:** {definition}");
        if let Some(source) = non_empty(&payload.definition_source) {
            section.push_str(&source_line(source, &payload.definition_url));
        }
        sections.push(section);
    }

    let related = payload.related_topics(RELATED_TOPIC_LIMIT);
    if !related.is_empty() {
        let lines: Vec<String> = related
            .iter()
            .map(|topic| format!("- [{}]({})", topic.text, topic.first_url))
            .collect();
        sections.push(format!("**Related topics:**\n{}", lines.join("\n")));
    }

    let found = !sections.is_empty();
    let content = if found {
        sections.join("\n\n")
    } else {
        format!(
            "No instant answer for \"{query}\".\n\nInstant answers cover well-known topics, \
             definitions and conversions. Try:\n- a shorter or more general phrase\n- the \
             name of a person, place or thing\n- a web search endpoint for full results"
        )
    };

    EndpointResult::new(content, EndpointType::InstantAnswer, shortcut.clone())
        .with_metadata("query", query)
        .with_metadata("answer_found", found)
        .with_metadata("related_topics", related.len())
}

fn source_line(source: &str, url: &str) -> String {
    if url.trim().is_empty() {
        format!("\n_Source: {source}_")
    } else {
        format!("\n_Source: [{source}]({})_", url.trim())
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|trimmed| !trimmed.is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct InstantAnswer {
    heading: String,
    abstract_text: String,
    abstract_source: String,
    #[serde(rename = "AbstractURL")]
    abstract_url: String,
    answer: Value,
    definition: String,
    definition_source: String,
    #[serde(rename = "DefinitionURL")]
    definition_url: String,
    related_topics: Vec<RelatedTopic>,
}

impl InstantAnswer {
    /// `Answer` is a string for most answer types and an object for some
    /// interactive ones; only plain text is shown.
    fn answer_text(&self) -> Option<&str> {
        self.answer.as_str().and_then(non_empty)
    }

    /// Flattens grouped topics and keeps the first `limit` usable entries.
    fn related_topics(&self, limit: usize) -> Vec<&RelatedTopic> {
        self.related_topics
            .iter()
            .flat_map(|topic| std::iter::once(topic).chain(topic.topics.iter()))
            .filter(|topic| !topic.text.trim().is_empty() && !topic.first_url.trim().is_empty())
            .take(limit)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct RelatedTopic {
    text: String,
    #[serde(rename = "FirstURL")]
    first_url: String,
    topics: Vec<RelatedTopic>,
}
