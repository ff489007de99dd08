//! Application services for pipeline lifecycle and status notification.

mod lifecycle;
mod notifier;

pub use lifecycle::{
    BridgeSettings, PipelineLifecycleError, PipelineLifecycleResult, PipelineLifecycleService,
    StartOutcome,
};
pub use notifier::{
    ActionStateChange, ExecutionStateChange, NotificationReport, StateChangeNotifier,
};
