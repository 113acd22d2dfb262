//! Custom endpoint routing for chat messages.
//!
//! A chat message of the form `/<shortcut> <query>` is routed to the
//! backend configured for that shortcut instead of the generic completion
//! webhook. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Routing and formatting services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
