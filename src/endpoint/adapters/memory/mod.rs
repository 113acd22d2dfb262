//! In-memory configuration store.

mod config_store;

pub use config_store::InMemoryEndpointStore;
