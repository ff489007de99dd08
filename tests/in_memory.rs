//! In-memory integration tests for the bridge.
//!
//! Tests are organized into modules by functionality:
//! - `pull_request_flow_tests`: Webhook-driven create, start, and delete
//! - `notification_flow_tests`: State changes reported back as statuses

mod in_memory {
    pub mod helpers;

    mod notification_flow_tests;
    mod pull_request_flow_tests;
}
