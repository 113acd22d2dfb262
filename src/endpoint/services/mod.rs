//! Application services for custom endpoint routing.

mod formatter;
mod router;

pub use formatter::to_formatted_content;
pub use router::{DEFAULT_PROBE_TIMEOUT, EndpointRouter};
