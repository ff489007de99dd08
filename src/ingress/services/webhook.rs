//! Routing of source-host webhooks to the pipeline lifecycle.

use crate::{
    ingress::domain::{HandlerResponse, InboundRequest, SOURCE_HOST_EVENT_HEADER},
    pipeline::{
        domain::{InstanceName, PullRequestAction, PullRequestEvent},
        ports::{CommitStatusPublisher, CorrelationStore, CredentialStore, PipelineControlPlane},
        services::{PipelineLifecycleResult, PipelineLifecycleService, StartOutcome},
    },
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Dispatches pull request webhooks to create-or-start and delete.
///
/// Only `opened`, `synchronize`, and `closed` reach the lifecycle service;
/// every other request is acknowledged without side effects.
pub struct WebhookRouter<P, S, K, N>
where
    P: PipelineControlPlane,
    S: CorrelationStore,
    K: CredentialStore,
    N: CommitStatusPublisher,
{
    lifecycle: PipelineLifecycleService<P, S, K, N>,
}

impl<P, S, K, N> WebhookRouter<P, S, K, N>
where
    P: PipelineControlPlane,
    S: CorrelationStore,
    K: CredentialStore,
    N: CommitStatusPublisher,
{
    /// Creates a router over the lifecycle service.
    #[must_use]
    pub const fn new(lifecycle: PipelineLifecycleService<P, S, K, N>) -> Self {
        Self { lifecycle }
    }

    /// Handles one inbound request.
    ///
    /// Create-or-start failures answer `500` with the error text. Delete
    /// answers `200` with either the deleted instance name or the error text.
    #[tracing::instrument(skip_all, fields(event = ?request.header(SOURCE_HOST_EVENT_HEADER)))]
    pub async fn handle(&self, request: &InboundRequest) -> HandlerResponse {
        if !request.is_source_host_event() {
            debug!("not a source-host event, acknowledging");
            return HandlerResponse::acknowledged();
        }
        let Some(payload) = request.json_body() else {
            warn!("source-host event without a JSON body, ignoring");
            return HandlerResponse::acknowledged();
        };
        let Some(raw_action) = payload.get("action").and_then(Value::as_str) else {
            info!("source-host event without an action, ignoring");
            return HandlerResponse::acknowledged();
        };

        match PullRequestAction::from(raw_action) {
            PullRequestAction::Opened | PullRequestAction::Synchronize => {
                self.create_or_start(&payload).await
            }
            PullRequestAction::Closed => self.delete(&payload).await,
            PullRequestAction::Other(action) => {
                info!(action = %action, "pull request action ignored");
                HandlerResponse::acknowledged()
            }
        }
    }

    async fn create_or_start(&self, payload: &Value) -> HandlerResponse {
        match self.start_from_payload(payload).await {
            Ok(outcome) => {
                info!(instance = %outcome.instance(), "pull request pipeline reconciled");
                HandlerResponse::acknowledged()
            }
            Err(err) => {
                error!(error = %err, "create-or-start failed");
                HandlerResponse::server_error(err.to_string())
            }
        }
    }

    async fn delete(&self, payload: &Value) -> HandlerResponse {
        match self.delete_from_payload(payload).await {
            Ok(instance) => HandlerResponse::ok(instance.to_string()),
            Err(err) => {
                error!(error = %err, "delete failed");
                HandlerResponse::ok(err.to_string())
            }
        }
    }

    async fn start_from_payload(&self, payload: &Value) -> PipelineLifecycleResult<StartOutcome> {
        let event = PullRequestEvent::from_payload(payload)?;
        self.lifecycle.create_or_start(&event).await
    }

    async fn delete_from_payload(&self, payload: &Value) -> PipelineLifecycleResult<InstanceName> {
        let event = PullRequestEvent::from_payload(payload)?;
        self.lifecycle.delete(&event).await
    }
}
