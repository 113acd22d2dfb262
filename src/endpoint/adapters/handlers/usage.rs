//! Usage help rendering.

use minijinja::{Environment, context};

use crate::endpoint::domain::{ClassifiedError, EndpointOutcome, Shortcut};

/// Renders a help template with the invoking shortcut in scope.
pub(super) fn render_usage(template: &str, shortcut: &Shortcut) -> EndpointOutcome<String> {
    let environment = Environment::new();
    environment
        .render_str(template, context! { shortcut => shortcut.as_str() })
        .map_err(|error| {
            ClassifiedError::unknown(format!(
                "usage help for /{shortcut} could not be rendered: {error}"
            ))
        })
}
