//! Tests for the media catalogue search handler.

use std::time::Duration;

use reqwest::Client;
use rstest::rstest;
use serde_json::{Value, json};
use switchyard::endpoint::{
    adapters::handlers::MediaSearchHandler,
    domain::{EndpointType, ErrorKind},
    ports::EndpointHandlerExt,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use super::helpers::{client, endpoint, endpoint_for, shortcut_of, single_request};

fn movie(title: &str, date: &str, rating: f64, status: Option<u8>) -> Value {
    let mut item = json!({
        "mediaType": "movie",
        "title": title,
        "releaseDate": date,
        "voteAverage": rating,
    });
    if let Some(code) = status {
        item["mediaInfo"] = json!({ "status": code });
    }
    item
}

async fn stub_search(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[rstest]
#[tokio::test]
async fn lists_results_with_year_rating_and_availability(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("query", "The Matrix"))
        .and(query_param("page", "1"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "totalPages": 1,
            "totalResults": 2,
            "results": [
                movie("The Matrix", "1999-03-31", 8.2, Some(5)),
                {
                    "mediaType": "tv",
                    "name": "The Matrix Files",
                    "firstAirDate": "2003-01-01",
                },
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "j", "media_search", Some("secret"));

    let result = MediaSearchHandler::new(client)
        .handle_request("The Matrix", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed");

    let content = result.content();
    assert!(content.starts_with("Results for \"The Matrix\":"));
    assert!(content.contains("1. **The Matrix** (1999)\n   Movie · Rating 8.2/10 · Available"));
    assert!(content.contains("2. **The Matrix Files** (2003)\n   TV Show · Not in library"));
    assert!(!content.contains("Showing top"));
    assert_eq!(result.endpoint_type(), &EndpointType::MediaSearch);
    let metadata = result.metadata().expect("metadata should be present");
    assert_eq!(metadata.get("total_results"), Some(&json!(2)));
    assert_eq!(metadata.get("page"), Some(&json!(1)));
}

#[rstest]
#[tokio::test]
async fn caps_listing_at_five_entries(client: Client) {
    let server = MockServer::start().await;
    let results: Vec<Value> = (1..=7)
        .map(|n| movie(&format!("Film {n}"), "2000-01-01", 6.0, None))
        .collect();
    stub_search(&server, json!({ "totalResults": 42, "results": results })).await;
    let config = endpoint_for(&server, "j", "media_search", None);

    let result = MediaSearchHandler::new(client)
        .handle_request("film", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed");

    assert!(result.content().contains("5. **Film 5**"));
    assert!(!result.content().contains("Film 6"));
    assert!(result.content().contains("_Showing top 5 of 42 results._"));
}

#[rstest]
#[tokio::test]
async fn zero_results_is_a_success_with_guidance(client: Client) {
    let server = MockServer::start().await;
    stub_search(&server, json!({ "totalResults": 0, "results": [] })).await;
    let config = endpoint_for(&server, "j", "media_search", None);

    let result = MediaSearchHandler::new(client)
        .handle_request("qwertyuiop", &config, &shortcut_of(&config))
        .await
        .expect("empty search should succeed");

    let content = result.content();
    assert!(content.contains("No movies or TV shows found for \"qwertyuiop\""));
    assert!(content.contains("Try:\n- checking the spelling"));
    assert!(content.contains("- searching for the original title"));
}

#[rstest]
#[tokio::test]
async fn sends_api_key_only_when_configured(client: Client) {
    let keyed = MockServer::start().await;
    stub_search(&keyed, json!({ "results": [] })).await;
    let config = endpoint_for(&keyed, "j", "media_search", Some("secret"));
    MediaSearchHandler::new(client.clone())
        .handle_request("Alien", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed");
    let request = single_request(&keyed).await;
    assert_eq!(
        request
            .headers
            .get("x-api-key")
            .and_then(|value| value.to_str().ok()),
        Some("secret")
    );

    let open = MockServer::start().await;
    stub_search(&open, json!({ "results": [] })).await;
    let config = endpoint_for(&open, "j", "media_search", Some("  "));
    MediaSearchHandler::new(client)
        .handle_request("Alien", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed");
    let request = single_request(&open).await;
    assert!(request.headers.get("x-api-key").is_none());
}

#[rstest]
#[tokio::test]
async fn percent_encodes_the_query(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("query", "Amélie & Nino+"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "j", "media_search", None);

    MediaSearchHandler::new(client)
        .handle_request("Amélie & Nino+", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed");

    let request = single_request(&server).await;
    assert_eq!(
        request.url.query(),
        Some("query=Am%C3%A9lie%20%26%20Nino%2B&page=1&language=en")
    );
}

#[rstest]
#[tokio::test]
async fn keeps_base_url_path_prefix(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jellyseerr/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let config = endpoint(
        "j",
        "media_search",
        &format!("{}/jellyseerr/", server.uri()),
        None,
    );

    MediaSearchHandler::new(client)
        .handle_request("Alien", &config, &shortcut_of(&config))
        .await
        .expect("search should succeed");
}

#[rstest]
#[case(401, None, ErrorKind::Unauthorized, "requires an API key")]
#[case(401, Some("stale"), ErrorKind::Unauthorized, "rejected the API key")]
#[case(403, Some("key"), ErrorKind::Forbidden, "denied access")]
#[case(404, None, ErrorKind::NotFound, "search API was not found")]
#[case(502, None, ErrorKind::Network, "status 502")]
#[tokio::test]
async fn maps_rejections_to_error_kinds(
    client: Client,
    #[case] status: u16,
    #[case] api_key: Option<&str>,
    #[case] kind: ErrorKind,
    #[case] message_fragment: &str,
) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "j", "media_search", api_key);

    let error = MediaSearchHandler::new(client)
        .handle_request("Alien", &config, &shortcut_of(&config))
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

#[rstest]
#[tokio::test]
async fn surfaces_backend_error_message(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database locked" })),
        )
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "j", "media_search", None);

    let error = MediaSearchHandler::new(client)
        .handle_request("Alien", &config, &shortcut_of(&config))
        .await
        .expect_err("search should fail");

    assert_eq!(error.kind(), ErrorKind::Network);
    assert!(error.message().contains("database locked"));
}

#[rstest]
#[tokio::test]
async fn malformed_payload_is_a_serialization_error(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "j", "media_search", None);

    let error = MediaSearchHandler::new(client)
        .handle_request("Alien", &config, &shortcut_of(&config))
        .await
        .expect_err("search should fail");

    assert_eq!(error.kind(), ErrorKind::Serialization);
}

#[rstest]
#[tokio::test]
async fn slow_backend_times_out(client: Client) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let config = endpoint_for(&server, "j", "media_search", None);

    let error = MediaSearchHandler::new(client)
        .with_timeout(Duration::from_millis(100))
        .handle_request("Alien", &config, &shortcut_of(&config))
        .await
        .expect_err("search should time out");

    assert_eq!(error.kind(), ErrorKind::Timeout);
}

#[rstest]
#[tokio::test]
async fn help_query_renders_usage_without_a_request(client: Client) {
    let server = MockServer::start().await;
    let config = endpoint_for(&server, "movies", "media_search", None);

    let result = MediaSearchHandler::new(client)
        .handle_request("help", &config, &shortcut_of(&config))
        .await
        .expect("usage should render");

    assert!(result.content().contains("`/movies The Matrix`"));
    let requests = server
        .received_requests()
        .await
        .expect("request recording should be enabled");
    assert!(requests.is_empty());
}
