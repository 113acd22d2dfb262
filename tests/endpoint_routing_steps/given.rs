//! Given steps for endpoint routing BDD scenarios.

use super::world::{RoutingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;
use switchyard::endpoint::domain::EndpointConfigDraft;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[given(r#"a media backend that knows "{title}""#)]
fn media_backend_knows(world: &mut RoutingWorld, title: String) {
    serve_titles(world, &[title]);
}

#[given(r#"a media backend with the titles "{first}" and "{second}""#)]
fn media_backend_knows_two(world: &mut RoutingWorld, first: String, second: String) {
    serve_titles(world, &[first, second]);
}

fn serve_titles(world: &mut RoutingWorld, titles: &[String]) {
    let server = run_async(MockServer::start());
    let results: Vec<_> = titles
        .iter()
        .map(|title| {
            json!({
                "mediaType": "movie",
                "title": title,
                "releaseDate": "2010-07-16",
                "voteAverage": 8.4,
            })
        })
        .collect();
    let total = results.len();
    let body = json!({
        "page": 1,
        "totalPages": 1,
        "totalResults": total,
        "results": results,
    });
    run_async(
        Mock::given(method("GET"))
            .and(path("/api/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server),
    );
    world.backend = Some(server);
}

#[given("a media backend that answers with status {status:u16}")]
fn media_backend_answers_status(world: &mut RoutingWorld, status: u16) {
    let server = run_async(MockServer::start());
    run_async(
        Mock::given(method("GET"))
            .and(path("/api/v1/search"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server),
    );
    world.backend = Some(server);
}

#[given(r#"the shortcut "{shortcut}" is configured for media search"#)]
fn shortcut_configured(world: &mut RoutingWorld, shortcut: String) -> Result<(), eyre::Report> {
    configure_media_shortcut(world, shortcut)
}

/// Validates a media search endpoint for `shortcut` and stores it.
///
/// # Errors
///
/// Returns an error when validation or the store write fails.
pub fn configure_media_shortcut(
    world: &mut RoutingWorld,
    shortcut: String,
) -> Result<(), eyre::Report> {
    let config = EndpointConfigDraft::new(shortcut, "Media server", world.backend_url())
        .with_type("media_search");
    let validated = world
        .router()?
        .validate_endpoint_config(config)
        .wrap_err("validate endpoint configuration")?;
    world
        .store
        .upsert(validated)
        .wrap_err("store endpoint configuration")?;
    Ok(())
}
