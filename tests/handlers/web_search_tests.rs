//! Tests for the metasearch handler.

use reqwest::Client;
use rstest::rstest;
use serde_json::{Value, json};
use switchyard::endpoint::{
    adapters::handlers::WebSearchHandler, domain::ErrorKind, ports::EndpointHandlerExt,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use super::helpers::{client, endpoint_for, shortcut_of, single_request};

fn web_item(n: usize, content: &str) -> Value {
    json!({
        "title": format!("Result {n}"),
        "url": format!("https://example.org/{n}"),
        "content": content,
        "engine": "duckduckgo",
    })
}

#[rstest]
#[tokio::test]
async fn lists_numbered_results_with_sources(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "flutter tutorial"))
        .and(query_param("format", "json"))
        .and(query_param("safesearch", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number_of_results": 2,
            "results": [web_item(1, "First snippet"), web_item(2, "")],
        })))
        .expect(1)
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "search", "web_search", None);

    let result = WebSearchHandler::new(client)
        .handle_request("flutter tutorial", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed");

    let content = result.content();
    assert!(content.starts_with("Web results for \"flutter tutorial\":"));
    assert!(content.contains(
        "1. **Result 1**\n   https://example.org/1\n   First snippet\n   _Source: duckduckgo_"
    ));
    assert!(content.contains("2. **Result 2**\n   https://example.org/2\n   _Source: duckduckgo_"));
}

#[rstest]
#[tokio::test]
async fn tolerates_results_with_null_fields(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                web_item(1, "Kept"),
                { "title": null, "url": "https://example.org/untitled", "content": null },
                { "title": "No link", "url": null, "engine": null },
            ],
        })))
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "search", "web_search", None);

    let result = WebSearchHandler::new(client)
        .handle_request("partial", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed despite null fields");

    let content = result.content();
    assert!(content.contains("1. **Result 1**"));
    assert!(content.contains("2. **Untitled**\n   https://example.org/untitled"));
    assert!(content.contains("3. **No link**"));
    assert!(!content.contains("Showing top"));
}

#[rstest]
#[tokio::test]
async fn truncates_long_snippets_and_caps_listing(client: Client) {
    let server = MockServer::start().await;
    let long_snippet = "word ".repeat(60);
    let results: Vec<Value> = (1..=8).map(|n| web_item(n, &long_snippet)).collect();
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "search", "web_search", None);

    let result = WebSearchHandler::new(client)
        .handle_request("words", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed");

    let content = result.content();
    assert!(content.contains("...\n   _Source: duckduckgo_"));
    assert!(!content.contains(long_snippet.trim()));
    assert!(content.contains("_Showing top 5 of 8 results._"));
}

#[rstest]
#[tokio::test]
async fn forwards_inline_category(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "solar eclipse"))
        .and(query_param("categories", "news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "search", "web_search", None);

    let result = WebSearchHandler::new(client)
        .handle_request("category:News solar eclipse", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed");

    assert!(result.content().contains("removing the `category:` filter"));
    let metadata = result.metadata().expect("metadata should be present");
    assert_eq!(metadata.get("category"), Some(&json!("news")));
}

#[rstest]
#[tokio::test]
async fn category_without_terms_shows_usage(client: Client) {
    let server = MockServer::start().await;
    let config = endpoint_for(&server, "search", "web_search", None);

    let result = WebSearchHandler::new(client)
        .handle_request("category:images", &config, &shortcut_of(&config))
        .await
        .expect("usage should render");

    assert!(result.content().contains("`/search category:news solar eclipse`"));
    let requests = server
        .received_requests()
        .await
        .expect("request recording should be enabled");
    assert!(requests.is_empty());
}

#[rstest]
#[tokio::test]
async fn zero_results_is_a_success_with_guidance(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "search", "web_search", None);

    let result = WebSearchHandler::new(client)
        .handle_request("zzzyyyxxx", &config, &shortcut_of(&config))
        .await
        .expect("empty search should succeed");

    let content = result.content();
    assert!(content.starts_with("No web results found for \"zzzyyyxxx\""));
    assert!(content.contains("Try:\n- different or fewer keywords"));
    assert!(content.contains("- another SearXNG instance"));
    assert!(!content.contains("category:"));
    let request = single_request(&server).await;
    assert!(request.url.query().is_some_and(|query| !query.contains("categories")));
}

#[rstest]
#[case(403, ErrorKind::Forbidden, "searx.space")]
#[case(404, ErrorKind::NotFound, "no search API")]
#[case(429, ErrorKind::RateLimited, "rate limiting")]
#[case(503, ErrorKind::Network, "status 503")]
#[tokio::test]
async fn maps_rejections_to_error_kinds(
    client: Client,
    #[case] status: u16,
    #[case] kind: ErrorKind,
    #[case] message_fragment: &str,
) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "search", "web_search", None);

    let error = WebSearchHandler::new(client)
        .handle_request("rust", &config, &shortcut_of(&config))
        .await
        .expect_err("search should fail");

    assert_eq!(error.kind(), kind);
    assert_eq!(error.status_code(), Some(status));
    assert!(
        error.message().contains(message_fragment),
        "unexpected message: {}",
        error.message()
    );
}
