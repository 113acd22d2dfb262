//! JSON file configuration store.
//!
//! Reads and writes the settings mapping
//! `{ "<shortcut>": { "name", "url", "type", "api_key" } }` through a
//! capability-scoped directory handle.

mod config_store;
mod models;

pub use config_store::{FileEndpointStore, LoadReport};
