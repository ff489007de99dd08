//! Per-pull-request pipeline lifecycle and status notification.
//!
//! Pull request events create, start, and delete pipelines cloned from a
//! template; control-plane state changes flow back to the source host as
//! commit statuses. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
