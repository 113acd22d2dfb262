//! Metasearch handler (SearXNG JSON API).

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use super::{
    http::{endpoint_url, error_message, read_json, send},
    listing::ResultListing,
    usage::render_usage,
};
use crate::endpoint::{
    domain::{
        ClassifiedError, EndpointConfig, EndpointOutcome, EndpointResult, EndpointType, ErrorKind,
        Shortcut,
    },
    ports::EndpointHandler,
};

const SEARCH_PATH: &str = "search";
const STATUS_PATH: &str = "healthz";
const CATEGORY_PREFIX: &str = "category:";
/// SearXNG `safesearch` level 1 (moderate).
const SAFE_SEARCH_MODERATE: &str = "1";
const SNIPPET_LIMIT: usize = 150;
const ELLIPSIS: &str = "...";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

const USAGE: &str = "\
**Web search** queries a SearXNG metasearch instance.

Usage: `/{{ shortcut }} <search terms>`

Examples:
- `/{{ shortcut }} rust async tutorial`
- `/{{ shortcut }} category:news solar eclipse`
- `/{{ shortcut }} category:images northern lights`

Add `category:<name>` anywhere in the query to limit results to one \
category (general, news, images, videos, science, it, ...).";

/// Searches a SearXNG instance through its JSON output format.
#[derive(Debug, Clone)]
pub struct WebSearchHandler {
    client: Client,
    timeout: Duration,
}

impl WebSearchHandler {
    /// Creates a handler using the shared HTTP client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-call time bound.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl EndpointHandler for WebSearchHandler {
    fn endpoint_type(&self) -> EndpointType {
        EndpointType::WebSearch
    }

    fn usage(&self, shortcut: &Shortcut) -> EndpointOutcome<String> {
        render_usage(USAGE, shortcut)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn reachability_url(&self, config: &EndpointConfig) -> EndpointOutcome<Url> {
        endpoint_url(config.base_url(), STATUS_PATH)
    }

    async fn search(
        &self,
        query: &str,
        config: &EndpointConfig,
        shortcut: &Shortcut,
    ) -> EndpointOutcome<EndpointResult> {
        let filtered = CategoryFilter::parse(query);
        if filtered.terms.is_empty() {
            let usage = self.usage(shortcut)?;
            return Ok(EndpointResult::new(
                usage,
                EndpointType::WebSearch,
                shortcut.clone(),
            ));
        }

        let service = config.display_name();
        let url = endpoint_url(config.base_url(), SEARCH_PATH)?;
        let mut request = self
            .client
            .get(url)
            .query(&[
                ("q", filtered.terms.as_str()),
                ("format", "json"),
                ("safesearch", SAFE_SEARCH_MODERATE),
            ])
            .timeout(self.timeout);
        if let Some(category) = filtered.category.as_deref() {
            request = request.query(&[("categories", category)]);
        }

        tracing::debug!(
            shortcut = %shortcut,
            query = %filtered.terms,
            category = filtered.category.as_deref().unwrap_or("any"),
            "searching the web"
        );
        let response = send(request, service).await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body_message = error_message(response).await;
            return Err(classify_status(status, config, body_message));
        }

        let payload: SearchResponse = read_json(response, service).await?;
        Ok(build_result(&filtered, &payload, shortcut))
    }
}

/// Search terms with an optional inline `category:<word>` filter removed.
#[derive(Debug, PartialEq, Eq)]
struct CategoryFilter {
    terms: String,
    category: Option<String>,
}

impl CategoryFilter {
    fn parse(query: &str) -> Self {
        let mut category = None;
        let mut terms = Vec::new();

        for token in query.split_whitespace() {
            let lowered = token.to_ascii_lowercase();
            match lowered.strip_prefix(CATEGORY_PREFIX) {
                Some(name) if category.is_none() && is_category_word(name) => {
                    category = Some(name.to_owned());
                }
                _ => terms.push(token),
            }
        }

        Self {
            terms: terms.join(" "),
            category,
        }
    }
}

fn is_category_word(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn classify_status(
    status: StatusCode,
    config: &EndpointConfig,
    body_message: Option<String>,
) -> ClassifiedError {
    let service = config.display_name();
    let code = status.as_u16();
    tracing::warn!(url = %config.base_url(), status = code, "web search rejected");

    let error = match status {
        StatusCode::NOT_FOUND => ClassifiedError::not_found(format!(
            "{service} has no search API at {}. Check the instance URL in the endpoint settings.",
            config.base_url()
        )),
        StatusCode::FORBIDDEN => ClassifiedError::new(
            ErrorKind::Forbidden,
            format!(
                "{service} refused the request. The instance may block programmatic access or \
                 have the JSON format disabled; enable `json` under `search.formats` or try \
                 another public instance from https://searx.space."
            ),
        ),
        StatusCode::TOO_MANY_REQUESTS => ClassifiedError::new(
            ErrorKind::RateLimited,
            format!(
                "{service} is rate limiting requests. Wait a minute before searching again or \
                 switch to a less busy instance."
            ),
        ),
        _ => ClassifiedError::network(body_message.map_or_else(
            || {
                format!(
                    "{service} returned status {code}. Check that the instance is running or try \
                     another public instance from https://searx.space."
                )
            },
            |message| format!("{service} request failed: {message}"),
        )),
    };
    error.with_status(code)
}

fn build_result(
    filtered: &CategoryFilter,
    payload: &SearchResponse,
    shortcut: &Shortcut,
) -> EndpointResult {
    let reported_total = payload
        .number_of_results
        .and_then(|total| usize::try_from(total).ok())
        .unwrap_or_default();
    let listing = ResultListing::new(&payload.results, reported_total, WebItem::describe);

    let query = &filtered.terms;
    let mut no_results = format!(
        "No web results found for \"{query}\".\n\nTry:\n- different or fewer keywords\n- \
         checking the spelling"
    );
    if filtered.category.is_some() {
        no_results.push_str("\n- removing the `category:` filter");
    }
    no_results.push_str("\n- another SearXNG instance if this one has few engines enabled");

    let heading = filtered.category.as_deref().map_or_else(
        || format!("Web results for \"{query}\":"),
        |category| format!("Web results for \"{query}\" in {category}:"),
    );
    let content = listing.render(&heading, &no_results);

    let mut result = EndpointResult::new(content, EndpointType::WebSearch, shortcut.clone())
        .with_metadata("query", query.as_str())
        .with_metadata("total_results", listing.total())
        .with_metadata("shown", listing.shown());
    if let Some(category) = filtered.category.as_deref() {
        result = result.with_metadata("category", category);
    }
    result
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    number_of_results: Option<u64>,
    #[serde(default)]
    results: Vec<WebItem>,
}

#[derive(Debug, Deserialize)]
struct WebItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    engine: Option<String>,
}

impl WebItem {
    fn describe(&self) -> String {
        let title = non_blank(self.title.as_deref()).unwrap_or("Untitled");
        let mut entry = format!("**{title}**");
        if let Some(url) = non_blank(self.url.as_deref()) {
            entry.push_str(&format!("\n   {url}"));
        }
        if let Some(snippet) = non_blank(self.content.as_deref()) {
            entry.push_str(&format!("\n   {}", truncate_snippet(snippet)));
        }
        if let Some(engine) = self.engine.as_deref().filter(|engine| !engine.is_empty()) {
            entry.push_str(&format!("\n   _Source: {engine}_"));
        }
        entry
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn truncate_snippet(snippet: &str) -> String {
    if snippet.chars().count() <= SNIPPET_LIMIT {
        return snippet.to_owned();
    }
    let mut truncated: String = snippet
        .chars()
        .take(SNIPPET_LIMIT - ELLIPSIS.len())
        .collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push_str(ELLIPSIS);
    truncated
}
