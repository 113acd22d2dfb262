//! Transcript rendering for handler results.

use serde_json::Value;

use crate::endpoint::domain::EndpointResult;

/// Renders a result for the chat transcript.
///
/// The body is prefixed with the backend's friendly name in bold (or the
/// uppercased shortcut for types without one) and followed by a single
/// metadata line when metadata is present. Pure: the same result always
/// renders to the same string.
#[must_use]
pub fn to_formatted_content(result: &EndpointResult) -> String {
    let display_name = result.endpoint_type().friendly_name().map_or_else(
        || result.shortcut().as_str().to_uppercase(),
        str::to_owned,
    );

    let mut formatted = format!("**{display_name}**\n\n{}", result.content());
    if let Some(metadata) = result.metadata().filter(|metadata| !metadata.is_empty()) {
        let facts: Vec<String> = metadata
            .iter()
            .map(|(key, value)| format!("{key}: {}", render_value(value)))
            .collect();
        formatted.push_str(&format!("\n\n_{}_", facts.join(" · ")));
    }
    formatted
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
