//! Port contracts for custom endpoint routing.
//!
//! Ports define the configuration read interface consumed by the router and
//! the capability contract each backend handler implements.

pub mod config_store;
pub mod handler;

pub use config_store::{EndpointConfigStore, EndpointStoreError, EndpointStoreResult};
pub use handler::{DEFAULT_HANDLER_TIMEOUT, EndpointHandler, EndpointHandlerExt};
