//! Routers turning inbound invocations into service calls.

mod handlers;
mod state_change;
mod webhook;

pub use handlers::BridgeHandlers;
pub use state_change::StateChangeRouter;
pub use webhook::WebhookRouter;
