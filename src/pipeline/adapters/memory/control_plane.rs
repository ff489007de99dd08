//! In-memory control plane for lifecycle and notification tests.

use crate::pipeline::{
    domain::{ExecutionId, PipelineDefinition, PipelineName, StageState},
    ports::{ControlPlaneError, ControlPlaneResult, Lookup, PipelineControlPlane},
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory pipeline control plane.
///
/// Models named pipelines, execution starts, and stage states without any
/// remote service. Every create, start, and delete is recorded so tests can
/// assert on the exact sequence of control-plane calls.
#[derive(Debug, Clone, Default)]
pub struct InMemoryControlPlane {
    state: Arc<RwLock<InMemoryControlPlaneState>>,
}

#[derive(Debug, Default)]
struct InMemoryControlPlaneState {
    pipelines: BTreeMap<PipelineName, PipelineDefinition>,
    stage_states: HashMap<PipelineName, Vec<StageState>>,
    executions: Vec<(PipelineName, ExecutionId)>,
    created: Vec<PipelineName>,
    deleted: Vec<PipelineName>,
}

fn poisoned<E: std::fmt::Display>(err: E) -> ControlPlaneError {
    ControlPlaneError::remote(std::io::Error::other(err.to_string()))
}

impl InMemoryControlPlane {
    /// Creates an empty control plane.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pipeline without recording a create call.
    ///
    /// # Errors
    ///
    /// Returns [`ControlPlaneError::InvalidDefinition`] when the declaration
    /// has no name, or runtime errors when lock acquisition fails.
    pub fn insert_pipeline(&self, definition: PipelineDefinition) -> ControlPlaneResult<()> {
        let name = declared_name(&definition)?;
        let mut state = self.state.write().map_err(poisoned)?;
        state.pipelines.insert(name, definition);
        Ok(())
    }

    /// Replaces the stage states reported for a pipeline.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn set_stage_states(
        &self,
        name: PipelineName,
        stages: Vec<StageState>,
    ) -> ControlPlaneResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.stage_states.insert(name, stages);
        Ok(())
    }

    /// Returns the declaration of a pipeline, if it exists.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn pipeline(&self, name: &PipelineName) -> ControlPlaneResult<Option<PipelineDefinition>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.pipelines.get(name).cloned())
    }

    /// Returns the names passed to successful create calls, in order.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn created(&self) -> ControlPlaneResult<Vec<PipelineName>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.created.clone())
    }

    /// Returns the pipelines whose executions were started, in order.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn started(&self) -> ControlPlaneResult<Vec<PipelineName>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.executions.iter().map(|(name, _)| name.clone()).collect())
    }

    /// Returns the names passed to delete calls, in order.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn deleted(&self) -> ControlPlaneResult<Vec<PipelineName>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.deleted.clone())
    }
}

fn declared_name(definition: &PipelineDefinition) -> ControlPlaneResult<PipelineName> {
    definition
        .name()
        .ok_or_else(|| ControlPlaneError::InvalidDefinition("declaration has no name".to_owned()))
}

#[async_trait]
impl PipelineControlPlane for InMemoryControlPlane {
    async fn start_execution(
        &self,
        name: &PipelineName,
    ) -> ControlPlaneResult<Lookup<ExecutionId>> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.pipelines.contains_key(name) {
            return Ok(Lookup::NotFound);
        }
        let execution_id = ExecutionId::new(Uuid::new_v4().to_string());
        state.executions.push((name.clone(), execution_id.clone()));
        Ok(Lookup::Found(execution_id))
    }

    async fn get_pipeline(
        &self,
        name: &PipelineName,
    ) -> ControlPlaneResult<Lookup<PipelineDefinition>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .pipelines
            .get(name)
            .cloned()
            .map_or(Lookup::NotFound, Lookup::Found))
    }

    async fn create_pipeline(&self, definition: &PipelineDefinition) -> ControlPlaneResult<()> {
        let name = declared_name(definition)?;
        let mut state = self.state.write().map_err(poisoned)?;
        if state.pipelines.contains_key(&name) {
            return Err(ControlPlaneError::AlreadyExists(name));
        }
        state.pipelines.insert(name.clone(), definition.clone());
        state.created.push(name);
        Ok(())
    }

    async fn delete_pipeline(&self, name: &PipelineName) -> ControlPlaneResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.pipelines.remove(name);
        state.stage_states.remove(name);
        state.deleted.push(name.clone());
        Ok(())
    }

    async fn get_pipeline_state(
        &self,
        name: &PipelineName,
    ) -> ControlPlaneResult<Lookup<Vec<StageState>>> {
        let state = self.state.read().map_err(poisoned)?;
        if !state.pipelines.contains_key(name) {
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::Found(
            state.stage_states.get(name).cloned().unwrap_or_default(),
        ))
    }
}
