//! Routing of control-plane state changes to the status notifier.

use crate::{
    ingress::domain::{ControlPlaneEvent, HandlerResponse, StateChange, StateChangeError},
    pipeline::{
        ports::{CommitStatusPublisher, CorrelationStore, CredentialStore, PipelineControlPlane},
        services::{NotificationReport, StateChangeNotifier},
    },
};
use serde_json::Value;
use tracing::{info, warn};

/// Dispatches control-plane events to the notifier.
///
/// Always acknowledges; notification outcomes are only logged.
pub struct StateChangeRouter<P, S, K, N>
where
    P: PipelineControlPlane,
    S: CorrelationStore,
    K: CredentialStore,
    N: CommitStatusPublisher,
{
    notifier: StateChangeNotifier<P, S, K, N>,
}

impl<P, S, K, N> StateChangeRouter<P, S, K, N>
where
    P: PipelineControlPlane,
    S: CorrelationStore,
    K: CredentialStore,
    N: CommitStatusPublisher,
{
    /// Creates a router over the notifier.
    #[must_use]
    pub const fn new(notifier: StateChangeNotifier<P, S, K, N>) -> Self {
        Self { notifier }
    }

    /// Decodes a raw event and handles it.
    pub async fn handle_json(&self, payload: Value) -> HandlerResponse {
        match serde_json::from_value::<ControlPlaneEvent>(payload) {
            Ok(event) => self.handle(&event).await,
            Err(err) => {
                warn!(error = %err, "undecodable control-plane event ignored");
                HandlerResponse::acknowledged()
            }
        }
    }

    /// Handles one decoded event.
    #[tracing::instrument(
        skip_all,
        fields(
            detail_type = %event.detail_type,
            pipeline = %event.detail.pipeline,
            time = ?event.time,
        )
    )]
    pub async fn handle(&self, event: &ControlPlaneEvent) -> HandlerResponse {
        let report = match event.state_change() {
            Ok(StateChange::Execution(change)) => self.notifier.notify_execution(&change).await,
            Ok(StateChange::Action(change)) => self.notifier.notify_action(&change).await,
            Err(err @ StateChangeError::Unrecognized(_)) => {
                info!(error = %err, "control-plane event ignored");
                NotificationReport::default()
            }
            Err(err) => {
                warn!(error = %err, "malformed control-plane event ignored");
                NotificationReport::default()
            }
        };
        if report.failed > 0 {
            warn!(
                delivered = report.delivered,
                failed = report.failed,
                "some statuses were not delivered"
            );
        }
        HandlerResponse::acknowledged()
    }
}
