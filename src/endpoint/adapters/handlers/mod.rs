//! Built-in endpoint handlers.
//!
//! One adapter per backend family. Each translates a query into the
//! backend's HTTP request and its JSON answer into an
//! [`EndpointResult`](crate::endpoint::domain::EndpointResult).

mod http;
mod instant_answer;
mod listing;
mod media_search;
mod usage;
mod web_search;

pub use instant_answer::{DUCKDUCKGO_API_URL, InstantAnswerHandler};
pub use listing::RESULT_LIMIT;
pub use media_search::MediaSearchHandler;
pub use web_search::WebSearchHandler;
