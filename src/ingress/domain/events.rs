//! Control-plane state-change events.

use crate::pipeline::{
    domain::{PipelineDomainError, PipelineName, StageName},
    services::{ActionStateChange, ExecutionStateChange},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ACTION_SUFFIXES: [&str; 2] = ["Action Execution State Change", "Action State Change"];
const STAGE_SUFFIX: &str = "Stage Execution State Change";
const EXECUTION_SUFFIX: &str = "Execution State Change";

/// Event emitted by the control plane when a pipeline, stage, or action
/// changes state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPlaneEvent {
    /// Event kind, e.g. `CodePipeline Pipeline Execution State Change`.
    #[serde(rename = "detail-type")]
    pub detail_type: String,
    /// When the change happened.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    /// Event payload.
    pub detail: StateChangeDetail,
}

/// Payload of a [`ControlPlaneEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChangeDetail {
    /// Pipeline that changed state.
    pub pipeline: String,
    /// New state, e.g. `SUCCEEDED`.
    pub state: String,
    /// Stage of the action, for action events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Action that changed state, for action events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Execution the change belongs to.
    #[serde(
        rename = "execution-id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub execution_id: Option<String>,
}

/// Classified state change ready for the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// Pipeline execution changed state.
    Execution(ExecutionStateChange),
    /// A single action changed state.
    Action(ActionStateChange),
}

/// Reasons an event cannot be turned into a [`StateChange`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateChangeError {
    /// The detail type is not one the bridge reacts to.
    #[error("unrecognized detail type: {0}")]
    Unrecognized(String),
    /// An action event carried no stage.
    #[error("action event for pipeline {0} has no stage")]
    MissingStage(String),
    /// A carried name failed validation.
    #[error(transparent)]
    Domain(#[from] PipelineDomainError),
}

impl ControlPlaneEvent {
    /// Classifies the event by its detail type.
    ///
    /// Action events are checked before execution events because both share
    /// the `Execution State Change` suffix. Stage-level events are not
    /// reported to the source host.
    ///
    /// # Errors
    ///
    /// Returns [`StateChangeError`] for unrecognized detail types, action
    /// events without a stage, or invalid stage names.
    pub fn state_change(&self) -> Result<StateChange, StateChangeError> {
        let kind = self.detail_type.trim();
        let pipeline = PipelineName::new(self.detail.pipeline.as_str());
        let state = self.detail.state.clone();

        if ACTION_SUFFIXES.iter().any(|suffix| kind.ends_with(suffix)) {
            let raw_stage = self
                .detail
                .stage
                .as_deref()
                .ok_or_else(|| StateChangeError::MissingStage(self.detail.pipeline.clone()))?;
            return Ok(StateChange::Action(ActionStateChange {
                pipeline,
                stage: StageName::new(raw_stage)?,
                state,
            }));
        }
        if kind.ends_with(EXECUTION_SUFFIX) && !kind.ends_with(STAGE_SUFFIX) {
            return Ok(StateChange::Execution(ExecutionStateChange { pipeline, state }));
        }
        Err(StateChangeError::Unrecognized(self.detail_type.clone()))
    }
}
