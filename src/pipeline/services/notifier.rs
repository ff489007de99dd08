//! Service translating control-plane state changes into commit statuses.

use super::BridgeSettings;
use crate::pipeline::{
    domain::{
        CommitState, CommitStatus, PipelineName, PipelineStatus, SourceToken, StageName,
        StatusesUrl, TemplateName,
    },
    ports::{
        CommitStatusPublisher, CorrelationStore, CredentialStore, Lookup, PipelineControlPlane,
    },
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Pipeline-level execution state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionStateChange {
    /// Pipeline whose execution changed state.
    pub pipeline: PipelineName,
    /// Raw state reported by the control plane.
    pub state: String,
}

/// Action-level execution state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionStateChange {
    /// Pipeline containing the action.
    pub pipeline: PipelineName,
    /// Stage containing the action.
    pub stage: StageName,
    /// Raw state reported by the control plane.
    pub state: String,
}

/// Outcome of one notification pass.
///
/// Failures never propagate; they are logged and counted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationReport {
    /// Statuses accepted by the source host.
    pub delivered: usize,
    /// Statuses that could not be resolved, mapped, or posted.
    pub failed: usize,
}

impl NotificationReport {
    fn record(&mut self, delivered: bool) {
        if delivered {
            self.delivered += 1;
        } else {
            self.failed += 1;
        }
    }

    const fn failure() -> Self {
        Self {
            delivered: 0,
            failed: 1,
        }
    }
}

struct Destination {
    url: StatusesUrl,
    token: SourceToken,
}

/// Fire-and-forget status notifier for control-plane events.
#[derive(Clone)]
pub struct StateChangeNotifier<P, S, K, N>
where
    P: PipelineControlPlane,
    S: CorrelationStore,
    K: CredentialStore,
    N: CommitStatusPublisher,
{
    control_plane: Arc<P>,
    correlation: Arc<S>,
    credentials: Arc<K>,
    publisher: Arc<N>,
    settings: BridgeSettings,
}

impl<P, S, K, N> StateChangeNotifier<P, S, K, N>
where
    P: PipelineControlPlane,
    S: CorrelationStore,
    K: CredentialStore,
    N: CommitStatusPublisher,
{
    /// Creates a new notifier.
    #[must_use]
    pub const fn new(
        control_plane: Arc<P>,
        correlation: Arc<S>,
        credentials: Arc<K>,
        publisher: Arc<N>,
        settings: BridgeSettings,
    ) -> Self {
        Self {
            control_plane,
            correlation,
            credentials,
            publisher,
            settings,
        }
    }

    /// Posts the mapped pipeline status, then one `failure` status per stage
    /// whose latest execution failed.
    #[tracing::instrument(skip_all, fields(pipeline = %change.pipeline, state = %change.state))]
    pub async fn notify_execution(&self, change: &ExecutionStateChange) -> NotificationReport {
        let Some(status) = parse_status(&change.state) else {
            return NotificationReport::failure();
        };
        let Some(destination) = self.resolve(&change.pipeline).await else {
            return NotificationReport::failure();
        };

        let mut report = NotificationReport::default();
        let primary = CommitStatus::for_pipeline(
            status,
            &change.pipeline,
            &self.settings.context,
            &self.settings.console,
        );
        report.record(self.post(&destination, &primary).await);

        for stage in self.failed_stages(&change.pipeline).await {
            let stage_status =
                CommitStatus::for_stage(CommitState::Failure, &stage, &self.settings.context);
            report.record(self.post(&destination, &stage_status).await);
        }

        info!(
            delivered = report.delivered,
            failed = report.failed,
            "execution state change notified"
        );
        report
    }

    /// Posts the mapped state of a single action under its stage context.
    #[tracing::instrument(skip_all, fields(pipeline = %change.pipeline, stage = %change.stage, state = %change.state))]
    pub async fn notify_action(&self, change: &ActionStateChange) -> NotificationReport {
        let Some(status) = parse_status(&change.state) else {
            return NotificationReport::failure();
        };
        let Some(destination) = self.resolve(&change.pipeline).await else {
            return NotificationReport::failure();
        };

        let (state, _) = status.commit_state();
        let stage_status = CommitStatus::for_stage(state, &change.stage, &self.settings.context);
        let mut report = NotificationReport::default();
        report.record(self.post(&destination, &stage_status).await);
        report
    }

    async fn resolve(&self, pipeline: &PipelineName) -> Option<Destination> {
        let template = match TemplateName::from_pipeline_name(pipeline) {
            Ok(template) => template,
            Err(err) => {
                error!(error = %err, "cannot derive template from pipeline name");
                return None;
            }
        };
        let token = match self.credentials.source_token(&template).await {
            Ok(token) => token,
            Err(err) => {
                error!(template = %template, error = %err, "cannot resolve source token");
                return None;
            }
        };
        match self.correlation.get_latest(&template).await {
            Ok(url) => Some(Destination { url, token }),
            Err(err) => {
                error!(template = %template, error = %err, "cannot resolve statuses URL");
                None
            }
        }
    }

    async fn failed_stages(&self, pipeline: &PipelineName) -> Vec<StageName> {
        match self.control_plane.get_pipeline_state(pipeline).await {
            Ok(Lookup::Found(stages)) => stages
                .into_iter()
                .filter(|stage| stage.has_failed())
                .map(|stage| stage.stage_name().clone())
                .collect(),
            Ok(Lookup::NotFound) => {
                warn!("pipeline state unavailable, pipeline not found");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "could not read pipeline state");
                Vec::new()
            }
        }
    }

    async fn post(&self, destination: &Destination, status: &CommitStatus) -> bool {
        match self
            .publisher
            .publish(&destination.url, &destination.token, status)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                warn!(context = status.context(), error = %err, "status post failed");
                false
            }
        }
    }
}

fn parse_status(raw: &str) -> Option<PipelineStatus> {
    match PipelineStatus::try_from(raw) {
        Ok(status) => Some(status),
        Err(err) => {
            error!(error = %err, "no commit state mapping for status");
            None
        }
    }
}
