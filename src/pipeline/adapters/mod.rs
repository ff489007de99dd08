//! Adapter implementations for pipeline ports.

pub mod memory;

mod http;
mod parameters;

pub use http::HttpStatusPublisher;
pub use parameters::{ParameterCorrelationStore, ParameterCredentialStore};
