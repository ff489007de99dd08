//! Entry points for inbound triggers.
//!
//! Two kinds of invocation reach the bridge: source-host webhooks, routed to
//! the pipeline lifecycle service, and control-plane state changes, routed to
//! the status notifier. Both produce a [`domain::HandlerResponse`].

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
