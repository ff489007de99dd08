//! PR pipeline bridge: per-pull-request build pipelines.
//!
//! This crate clones a template build pipeline for every open pull request,
//! starts it on each push, deletes it when the pull request closes, and
//! reports pipeline and stage outcomes back to the pull request as commit
//! statuses.
//!
//! # Architecture
//!
//! The bridge follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (parameters, HTTP, memory)
//!
//! # Modules
//!
//! - [`pipeline`]: Instance naming, lifecycle, correlation, and notification
//! - [`ingress`]: Webhook and state-change routing
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber installation

pub mod config;
pub mod ingress;
pub mod pipeline;
pub mod telemetry;
