//! Request helpers shared by the HTTP handlers.

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoint::domain::{ClassifiedError, EndpointOutcome};

/// Appends `path` to the base URL, keeping any path prefix the base has.
pub(super) fn endpoint_url(base: &Url, path: &str) -> EndpointOutcome<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            ClassifiedError::validation(format!("'{base}' cannot be used as a base URL"))
        })?
        .pop_if_empty()
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Ok(url)
}

/// Sends the request, classifying transport failures.
pub(super) async fn send(request: RequestBuilder, service: &str) -> EndpointOutcome<Response> {
    request
        .send()
        .await
        .map_err(|err| transport_error(&err, service))
}

/// Reads a successful response body as JSON.
pub(super) async fn read_json<T>(response: Response, service: &str) -> EndpointOutcome<T>
where
    T: DeserializeOwned,
{
    let body = response
        .bytes()
        .await
        .map_err(|err| transport_error(&err, service))?;
    serde_json::from_slice(&body).map_err(|err| {
        ClassifiedError::serialization(format!(
            "{service} returned a response that could not be read: {err}"
        ))
    })
}

/// Extracts a `message` from a JSON error body, if the backend sent one.
///
/// Checks the top-level `message` first, then `error.message`, then a plain
/// string `error`.
pub(super) async fn error_message(response: Response) -> Option<String> {
    let body = response.bytes().await.ok()?;
    let value: Value = serde_json::from_slice(&body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| value.pointer("/error/message").and_then(Value::as_str))
        .or_else(|| value.get("error").and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

fn transport_error(err: &reqwest::Error, service: &str) -> ClassifiedError {
    if err.is_timeout() {
        return ClassifiedError::timeout(format!(
            "{service} took too long to respond. Try again in a moment."
        ));
    }
    if err.is_connect() {
        return ClassifiedError::network(format!(
            "Could not connect to {service}. Check the URL in the endpoint settings and that \
             the service is running."
        ));
    }
    if err.is_decode() {
        return ClassifiedError::serialization(format!(
            "{service} sent a response that could not be decoded: {err}"
        ));
    }
    ClassifiedError::network(format!("Request to {service} failed: {err}"))
}
