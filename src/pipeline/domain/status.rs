//! Pipeline status vocabulary and its mapping onto source-host commit states.

use super::{ParsePipelineStatusError, StageName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution status reported by the control plane for a pipeline or action.
///
/// Only the three statuses with a defined commit-state mapping are accepted;
/// anything else fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStatus {
    /// The execution has started.
    Started,
    /// The execution finished successfully.
    Succeeded,
    /// The execution failed.
    Failed,
}

impl PipelineStatus {
    /// Returns the control-plane spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
        }
    }

    /// Maps the status onto the source host's status vocabulary.
    ///
    /// | status | state | description |
    /// |---|---|---|
    /// | `STARTED` | `pending` | "Build started" |
    /// | `SUCCEEDED` | `success` | "Build Success" |
    /// | `FAILED` | `failure` | "Build Failed" |
    #[must_use]
    pub const fn commit_state(self) -> (CommitState, &'static str) {
        match self {
            Self::Started => (CommitState::Pending, "Build started"),
            Self::Succeeded => (CommitState::Success, "Build Success"),
            Self::Failed => (CommitState::Failure, "Build Failed"),
        }
    }
}

impl TryFrom<&str> for PipelineStatus {
    type Error = ParsePipelineStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "STARTED" => Ok(Self::Started),
            "SUCCEEDED" => Ok(Self::Succeeded),
            "FAILED" => Ok(Self::Failed),
            other => Err(ParsePipelineStatusError(other.to_owned())),
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commit status state accepted by the source host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    /// Build in progress.
    Pending,
    /// Build passed.
    Success,
    /// Build failed.
    Failure,
}

impl CommitState {
    /// Returns the wire spelling of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for CommitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest-execution status of a single stage, as reported by the pipeline
/// state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageExecutionStatus {
    /// Stage is running.
    InProgress,
    /// Stage failed.
    Failed,
    /// Stage succeeded.
    Succeeded,
    /// Stage was stopped.
    Stopped,
    /// Stage is stopping.
    Stopping,
    /// Stage was cancelled.
    Cancelled,
    /// Any status this crate does not recognize.
    #[serde(other)]
    Unknown,
}

/// Stage name paired with the status of its latest execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageState {
    stage_name: StageName,
    latest_status: Option<StageExecutionStatus>,
}

impl StageState {
    /// Creates a stage state; `latest_status` is `None` for stages that have
    /// never executed.
    #[must_use]
    pub const fn new(stage_name: StageName, latest_status: Option<StageExecutionStatus>) -> Self {
        Self {
            stage_name,
            latest_status,
        }
    }

    /// Returns the stage name.
    #[must_use]
    pub const fn stage_name(&self) -> &StageName {
        &self.stage_name
    }

    /// Returns the latest execution status, if any.
    #[must_use]
    pub const fn latest_status(&self) -> Option<StageExecutionStatus> {
        self.latest_status
    }

    /// Returns `true` when the latest execution of the stage failed.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.latest_status == Some(StageExecutionStatus::Failed)
    }
}
