//! Adapter implementations for endpoint routing ports.

pub mod file;
pub mod handlers;
pub mod memory;
