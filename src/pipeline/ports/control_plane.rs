//! Control-plane port for managing named pipelines.

use crate::pipeline::domain::{ExecutionId, PipelineDefinition, PipelineName, StageState};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for control-plane operations.
pub type ControlPlaneResult<T> = Result<T, ControlPlaneError>;

/// Outcome of a lookup that distinguishes absence from failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The named resource exists.
    Found(T),
    /// The named resource does not exist.
    NotFound,
}

/// Pipeline control-plane contract.
#[async_trait]
pub trait PipelineControlPlane: Send + Sync {
    /// Starts a new execution of the named pipeline.
    ///
    /// Returns [`Lookup::NotFound`] when no pipeline has that name. Starting a
    /// pipeline that is already running follows the control plane's own
    /// semantics.
    async fn start_execution(&self, name: &PipelineName)
    -> ControlPlaneResult<Lookup<ExecutionId>>;

    /// Fetches the declaration of the named pipeline.
    async fn get_pipeline(
        &self,
        name: &PipelineName,
    ) -> ControlPlaneResult<Lookup<PipelineDefinition>>;

    /// Submits a new pipeline declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ControlPlaneError::AlreadyExists`] when a pipeline with the
    /// declared name exists.
    async fn create_pipeline(&self, definition: &PipelineDefinition) -> ControlPlaneResult<()>;

    /// Deletes the named pipeline.
    async fn delete_pipeline(&self, name: &PipelineName) -> ControlPlaneResult<()>;

    /// Reports the latest execution status of every stage.
    async fn get_pipeline_state(
        &self,
        name: &PipelineName,
    ) -> ControlPlaneResult<Lookup<Vec<StageState>>>;
}

/// Errors returned by control-plane adapters.
#[derive(Debug, Clone, Error)]
pub enum ControlPlaneError {
    /// A pipeline with the same name already exists.
    #[error("pipeline already exists: {0}")]
    AlreadyExists(PipelineName),

    /// The declaration was rejected as invalid.
    #[error("invalid pipeline declaration: {0}")]
    InvalidDefinition(String),

    /// Any other remote failure.
    #[error("control plane error: {0}")]
    Remote(Arc<dyn std::error::Error + Send + Sync>),
}

impl ControlPlaneError {
    /// Wraps a remote failure.
    pub fn remote(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Remote(Arc::new(err))
    }
}
