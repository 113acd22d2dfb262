//! Shortcut message parser.

use serde::{Deserialize, Serialize};

use super::EndpointDomainError;

/// A chat message split into its shortcut and query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    shortcut: String,
    query: String,
}

impl ParsedCommand {
    /// Parses `/<shortcut>[ <query text>]` input.
    ///
    /// Leading and trailing whitespace around the message is ignored. The
    /// shortcut is the token between the single leading `/` and the first
    /// whitespace; the query is the trimmed remainder, or empty when no
    /// whitespace follows the shortcut.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointDomainError::MissingLeadingSlash`] when the message
    /// does not start with `/`.
    pub fn parse(raw_message: &str) -> Result<Self, EndpointDomainError> {
        let body = raw_message
            .trim()
            .strip_prefix('/')
            .ok_or(EndpointDomainError::MissingLeadingSlash)?;

        let (shortcut, query) = body
            .split_once(char::is_whitespace)
            .map_or((body, ""), |(token, rest)| (token, rest.trim()));

        Ok(Self {
            shortcut: shortcut.to_owned(),
            query: query.to_owned(),
        })
    }

    /// Returns the shortcut token without the leading slash.
    ///
    /// Empty when the message was a bare `/`.
    #[must_use]
    pub fn shortcut(&self) -> &str {
        &self.shortcut
    }

    /// Returns the trimmed query text, possibly empty.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Consumes the command, returning `(shortcut, query)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.shortcut, self.query)
    }
}
