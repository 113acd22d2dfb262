//! Tests for routing chat messages through to a stub media backend.

use std::sync::Arc;

use reqwest::Client;
use rstest::rstest;
use serde_json::json;
use switchyard::endpoint::{
    adapters::memory::InMemoryEndpointStore,
    domain::EndpointType,
    services::{EndpointRouter, to_formatted_content},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use super::helpers::{client, endpoint_for};

#[rstest]
#[tokio::test]
async fn routes_shortcut_message_to_media_backend(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("query", "Inception"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalResults": 2,
            "results": [
                { "mediaType": "movie", "title": "Inception", "releaseDate": "2010-07-16" },
                { "mediaType": "movie", "title": "Inception: The Cobol Job", "releaseDate": "2010-12-07" },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;
    let store = Arc::new(InMemoryEndpointStore::with_entries([endpoint_for(
        &server,
        "j",
        "media_search",
        None,
    )]));
    let router = EndpointRouter::with_builtin_handlers(store, client)
        .expect("built-in handlers should build");

    let result = router
        .route_request("/j Inception")
        .await
        .expect("routing should succeed");

    assert_eq!(result.endpoint_type(), &EndpointType::MediaSearch);
    assert!(result.content().contains("1. **Inception** (2010)"));
    assert!(result.content().contains("2. **Inception: The Cobol Job** (2010)"));
    assert!(to_formatted_content(&result).starts_with("**Jellyseerr**\n\nResults for \"Inception\":"));
}
