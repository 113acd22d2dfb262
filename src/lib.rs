//! Switchyard: custom endpoint routing for chat clients.
//!
//! A chat message of the form `/<shortcut> <query>` is routed to the
//! user-configured backend behind that shortcut instead of the language
//! model, and the backend's answer is rendered as transcript text.
//!
//! # Architecture
//!
//! Switchyard follows hexagonal architecture principles:
//!
//! - **Domain**: Shortcuts, endpoint configuration and the classified
//!   result/error model, free of I/O
//! - **Ports**: The configuration store and per-type handler contracts
//! - **Adapters**: In-memory and JSON file stores, and HTTP handlers for
//!   media search, web search and instant answers
//! - **Services**: The shortcut router and the transcript formatter
//!
//! # Modules
//!
//! - [`endpoint`]: Shortcut routing, endpoint handlers and configuration

pub mod endpoint;
