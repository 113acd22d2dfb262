//! Media catalogue search handler (Jellyseerr API).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
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
    ports::{DEFAULT_HANDLER_TIMEOUT, EndpointHandler},
};

const SEARCH_PATH: &str = "api/v1/search";
const API_KEY_HEADER: &str = "X-Api-Key";
const LANGUAGE: &str = "en";
/// `mediaInfo.status` value Jellyseerr uses for titles present in the library.
const STATUS_AVAILABLE: u8 = 5;
/// `mediaInfo.status` value for titles with some seasons or parts present.
const STATUS_PARTIALLY_AVAILABLE: u8 = 4;

const USAGE: &str = "\
**Media search** searches movies and TV shows on your media request server.

Usage: `/{{ shortcut }} <title>`

Examples:
- `/{{ shortcut }} The Matrix`
- `/{{ shortcut }} Breaking Bad`
- `/{{ shortcut }} Studio Ghibli`

Results show the release year, rating and whether the title is already available.";

/// Searches a Jellyseerr-compatible media request server.
#[derive(Debug, Clone)]
pub struct MediaSearchHandler {
    client: Client,
    timeout: Duration,
}

impl MediaSearchHandler {
    /// Creates a handler using the shared HTTP client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_HANDLER_TIMEOUT,
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
impl EndpointHandler for MediaSearchHandler {
    fn endpoint_type(&self) -> EndpointType {
        EndpointType::MediaSearch
    }

    fn usage(&self, shortcut: &Shortcut) -> EndpointOutcome<String> {
        render_usage(USAGE, shortcut)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn search(
        &self,
        query: &str,
        config: &EndpointConfig,
        shortcut: &Shortcut,
    ) -> EndpointOutcome<EndpointResult> {
        let service = config.display_name();
        let mut url = endpoint_url(config.base_url(), SEARCH_PATH)?;
        // Percent-encoded (`%20` for spaces), not form-encoded.
        url.set_query(Some(&format!(
            "query={}&page=1&language={LANGUAGE}",
            urlencoding::encode(query)
        )));

        let mut request = self.client.get(url).timeout(self.timeout);
        if let Some(api_key) = config.api_key() {
            request = request.header(API_KEY_HEADER, api_key);
        }

        tracing::debug!(shortcut = %shortcut, query, "searching media catalogue");
        let response = send(request, service).await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body_message = error_message(response).await;
            return Err(classify_status(status, config, shortcut, body_message));
        }

        let payload: SearchResponse = read_json(response, service).await?;
        Ok(build_result(query, &payload, shortcut))
    }
}

fn classify_status(
    status: StatusCode,
    config: &EndpointConfig,
    shortcut: &Shortcut,
    body_message: Option<String>,
) -> ClassifiedError {
    let service = config.display_name();
    let code = status.as_u16();
    tracing::warn!(shortcut = %shortcut, status = code, "media search rejected");

    let error = match status {
        StatusCode::UNAUTHORIZED if config.api_key().is_none() => ClassifiedError::new(
            ErrorKind::Unauthorized,
            format!(
                "{service} requires an API key. Add the key from Jellyseerr \
                 (Settings > General > API Key) to the /{shortcut} endpoint settings."
            ),
        ),
        StatusCode::UNAUTHORIZED => ClassifiedError::new(
            ErrorKind::Unauthorized,
            format!(
                "{service} rejected the API key configured for /{shortcut}. Check that the key \
                 is correct and has not been regenerated."
            ),
        ),
        StatusCode::FORBIDDEN => ClassifiedError::new(
            ErrorKind::Forbidden,
            format!(
                "{service} denied access. Make sure the API key belongs to a user with \
                 permission to search."
            ),
        ),
        StatusCode::NOT_FOUND => ClassifiedError::not_found(format!(
            "{service} search API was not found at {}. Check the base URL in the /{shortcut} \
             endpoint settings.",
            config.base_url()
        )),
        _ => ClassifiedError::network(body_message.map_or_else(
            || format!("{service} request failed with status {code}."),
            |message| format!("{service} request failed: {message}"),
        )),
    };
    error.with_status(code)
}

fn build_result(query: &str, payload: &SearchResponse, shortcut: &Shortcut) -> EndpointResult {
    let reported_total = payload
        .total_results
        .and_then(|total| usize::try_from(total).ok())
        .unwrap_or_default();
    let listing = ResultListing::new(&payload.results, reported_total, MediaItem::describe);

    let no_results = format!(
        "No movies or TV shows found for \"{query}\".\n\nTry:\n- checking the spelling\n- \
         searching for the original title\n- using fewer or more general words"
    );
    let content = listing.render(&format!("Results for \"{query}\":"), &no_results);

    let mut result = EndpointResult::new(content, EndpointType::MediaSearch, shortcut.clone())
        .with_metadata("query", query)
        .with_metadata("total_results", listing.total())
        .with_metadata("shown", listing.shown());
    if let Some(page) = payload.page {
        result = result.with_metadata("page", page);
    }
    if let Some(total_pages) = payload.total_pages {
        result = result.with_metadata("total_pages", total_pages);
    }
    result
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    results: Vec<MediaItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaItem {
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    media_info: Option<MediaInfo>,
}

#[derive(Debug, Deserialize)]
struct MediaInfo {
    #[serde(default)]
    status: Option<u8>,
}

impl MediaItem {
    fn describe(&self) -> String {
        let title = self
            .title
            .as_deref()
            .or_else(|| self.name.as_deref())
            .unwrap_or("Untitled");

        let mut heading = format!("**{title}**");
        if let Some(year) = self.year() {
            heading.push_str(&format!(" ({year})"));
        }

        let mut details = vec![self.kind().to_owned()];
        if let Some(rating) = self.vote_average.filter(|rating| *rating > 0.0) {
            details.push(format!("Rating {rating:.1}/10"));
        }
        details.push(self.availability().to_owned());

        format!("{heading}\n   {}", details.join(" · "))
    }

    fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or_else(|| self.first_air_date.as_deref())
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }

    fn kind(&self) -> &str {
        match self.media_type.as_deref() {
            Some("movie") => "Movie",
            Some("tv") => "TV Show",
            Some("person") => "Person",
            Some(other) if !other.is_empty() => other,
            _ => "Unknown",
        }
    }

    fn availability(&self) -> &'static str {
        match self.media_info.as_ref().and_then(|info| info.status) {
            Some(STATUS_AVAILABLE) => "Available",
            Some(STATUS_PARTIALLY_AVAILABLE) => "Partially available",
            _ => "Not in library",
        }
    }
}
