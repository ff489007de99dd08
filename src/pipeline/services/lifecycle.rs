//! Service layer reconciling per-PR pipelines with pull request state.

use crate::pipeline::{
    domain::{
        CommitStatus, ConsoleLink, InstanceName, PipelineDomainError, PipelineStatus,
        PullRequestEvent, StatusContext, TemplateName,
    },
    ports::{
        CommitStatusPublisher, ControlPlaneError, CorrelationStore, CorrelationStoreError,
        CredentialStore, CredentialStoreError, Lookup, PipelineControlPlane,
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for lifecycle operations.
#[derive(Debug, Error)]
pub enum PipelineLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PipelineDomainError),
    /// Correlation store operation failed.
    #[error(transparent)]
    Correlation(#[from] CorrelationStoreError),
    /// Credential lookup failed.
    #[error(transparent)]
    Credential(#[from] CredentialStoreError),
    /// Control-plane call failed.
    #[error(transparent)]
    ControlPlane(#[from] ControlPlaneError),
    /// The template pipeline to clone from does not exist.
    #[error("template pipeline {0} not found")]
    TemplateNotFound(TemplateName),
    /// Creating the per-PR pipeline failed.
    #[error("could not create pipeline {instance}: {source}")]
    Create {
        /// Instance that could not be created.
        instance: InstanceName,
        /// Underlying failure.
        #[source]
        source: Box<PipelineLifecycleError>,
    },
}

/// Result type for lifecycle service operations.
pub type PipelineLifecycleResult<T> = Result<T, PipelineLifecycleError>;

/// What `create_or_start` did with the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The instance existed and a new execution was started.
    Started(InstanceName),
    /// The instance did not exist and was cloned from the template.
    Created(InstanceName),
}

impl StartOutcome {
    /// Returns the instance the outcome refers to.
    #[must_use]
    pub const fn instance(&self) -> &InstanceName {
        match self {
            Self::Started(instance) | Self::Created(instance) => instance,
        }
    }
}

/// Fixed settings shared by the lifecycle and notification services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeSettings {
    /// Template pipeline cloned for each pull request.
    pub template: TemplateName,
    /// Builder for console links attached to pipeline statuses.
    pub console: ConsoleLink,
    /// Context labels of posted statuses.
    pub context: StatusContext,
}

impl BridgeSettings {
    /// Creates settings with the default status context.
    #[must_use]
    pub fn new(template: TemplateName, console: ConsoleLink) -> Self {
        Self {
            template,
            console,
            context: StatusContext::default(),
        }
    }

    /// Overrides the status context.
    #[must_use]
    pub fn with_context(mut self, context: StatusContext) -> Self {
        self.context = context;
        self
    }
}

/// Pipeline lifecycle orchestration service.
#[derive(Clone)]
pub struct PipelineLifecycleService<P, S, K, N>
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

impl<P, S, K, N> PipelineLifecycleService<P, S, K, N>
where
    P: PipelineControlPlane,
    S: CorrelationStore,
    K: CredentialStore,
    N: CommitStatusPublisher,
{
    /// Creates a new lifecycle service.
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

    /// Returns the settings the service was built with.
    #[must_use]
    pub const fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    /// Starts the pull request's pipeline, cloning it from the template when
    /// it does not exist yet.
    ///
    /// A `pending` status is posted first on a best-effort basis, then the
    /// statuses URL is recorded so state-change notifications can find it.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineLifecycleError`] when the correlation entry cannot
    /// be written, the start call fails for any reason other than a missing
    /// pipeline, or creation fails.
    #[tracing::instrument(skip_all, fields(pr_number = %event.number(), repository = %event.repository()))]
    pub async fn create_or_start(
        &self,
        event: &PullRequestEvent,
    ) -> PipelineLifecycleResult<StartOutcome> {
        let template = &self.settings.template;
        let instance = event.instance_name(template);
        info!(instance = %instance, "reconciling pipeline for pull request");

        self.announce_start(event, &instance).await;

        self.correlation
            .put(template, event.number(), event.statuses_url())
            .await?;

        match self
            .control_plane
            .start_execution(&instance.pipeline_name())
            .await?
        {
            Lookup::Found(execution_id) => {
                info!(instance = %instance, execution_id = %execution_id, "pipeline started");
                Ok(StartOutcome::Started(instance))
            }
            Lookup::NotFound => {
                info!(instance = %instance, "pipeline not found, cloning from template");
                self.create(event, &instance)
                    .await
                    .map_err(|err| PipelineLifecycleError::Create {
                        instance: instance.clone(),
                        source: Box::new(err),
                    })?;
                Ok(StartOutcome::Created(instance))
            }
        }
    }

    /// Deletes the pull request's pipeline and its correlation entry.
    ///
    /// # Errors
    ///
    /// See [`Self::delete_instance`].
    pub async fn delete(&self, event: &PullRequestEvent) -> PipelineLifecycleResult<InstanceName> {
        let instance = event.instance_name(&self.settings.template);
        self.delete_instance(&instance).await?;
        Ok(instance)
    }

    /// Parses an instance name and deletes that instance.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineLifecycleError::Domain`] when the name is not a
    /// canonical instance name, otherwise see [`Self::delete_instance`].
    pub async fn delete_by_name(&self, name: &str) -> PipelineLifecycleResult<InstanceName> {
        let instance = InstanceName::parse(name)?;
        self.delete_instance(&instance).await?;
        Ok(instance)
    }

    /// Removes the correlation entry keyed by the instance's template and PR
    /// number, then deletes the pipeline.
    ///
    /// An entry that is already gone is logged and tolerated so a repeated
    /// delete can still remove the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineLifecycleError`] when the store or the control plane
    /// fails.
    #[tracing::instrument(skip_all, fields(instance = %instance))]
    pub async fn delete_instance(&self, instance: &InstanceName) -> PipelineLifecycleResult<()> {
        match self
            .correlation
            .delete(instance.template(), instance.pull_request_number())
            .await
        {
            Ok(()) => {}
            Err(err @ CorrelationStoreError::NotFound { .. }) => {
                warn!(error = %err, "correlation entry already removed");
            }
            Err(err) => return Err(err.into()),
        }

        self.control_plane
            .delete_pipeline(&instance.pipeline_name())
            .await?;
        info!("pipeline deleted");
        Ok(())
    }

    async fn announce_start(&self, event: &PullRequestEvent, instance: &InstanceName) {
        let template = &self.settings.template;
        let token = match self.credentials.source_token(template).await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "skipping pending status, no source token");
                return;
            }
        };
        let status = CommitStatus::for_pipeline(
            PipelineStatus::Started,
            &instance.pipeline_name(),
            &self.settings.context,
            &self.settings.console,
        );
        if let Err(err) = self
            .publisher
            .publish(event.statuses_url(), &token, &status)
            .await
        {
            warn!(error = %err, "could not post pending status");
        }
    }

    async fn create(
        &self,
        event: &PullRequestEvent,
        instance: &InstanceName,
    ) -> PipelineLifecycleResult<()> {
        let template = &self.settings.template;
        let Lookup::Found(definition) = self
            .control_plane
            .get_pipeline(&template.pipeline_name())
            .await?
        else {
            return Err(PipelineLifecycleError::TemplateNotFound(template.clone()));
        };

        let token = self.credentials.source_token(template).await?;
        let cloned = definition.clone_for_instance(instance, &token, event.branch())?;

        match self.control_plane.create_pipeline(&cloned).await {
            Ok(()) => {
                info!(instance = %instance, branch = %event.branch(), "pipeline created");
                Ok(())
            }
            Err(ControlPlaneError::AlreadyExists(name)) => {
                info!(pipeline = %name, "pipeline created concurrently by another invocation");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
