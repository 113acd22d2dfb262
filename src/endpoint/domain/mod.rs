//! Domain model for custom endpoint routing.
//!
//! Configuration records, parsed commands, normalized handler results and
//! the classified error taxonomy shared by every handler. Nothing in here
//! performs I/O.

mod classified;
mod command;
mod config;
mod endpoint_type;
mod error;
mod result;
mod shortcut;

pub use classified::{ClassifiedError, EndpointOutcome, ErrorKind};
pub use command::ParsedCommand;
pub use config::{EndpointConfig, EndpointConfigDraft};
pub use endpoint_type::EndpointType;
pub use error::EndpointDomainError;
pub use result::{EndpointMetadata, EndpointResult};
pub use shortcut::Shortcut;
