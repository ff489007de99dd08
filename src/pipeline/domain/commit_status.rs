//! Commit status payloads posted back to the source host.

use super::{CommitState, PipelineName, PipelineStatus, StageName};
use serde::{Deserialize, Serialize};

/// Commit status body accepted by the source host's statuses endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatus {
    state: CommitState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_url: Option<String>,
}

impl CommitStatus {
    /// Builds the primary pipeline-level status with description and a
    /// console link.
    #[must_use]
    pub fn for_pipeline(
        status: PipelineStatus,
        pipeline: &PipelineName,
        context: &StatusContext,
        console: &ConsoleLink,
    ) -> Self {
        let (state, description) = status.commit_state();
        Self {
            state,
            description: Some(description.to_owned()),
            context: context.pipeline().to_owned(),
            target_url: Some(console.pipeline_url(pipeline)),
        }
    }

    /// Builds a minimal stage-level status carrying only state and context.
    #[must_use]
    pub fn for_stage(state: CommitState, stage: &StageName, context: &StatusContext) -> Self {
        Self {
            state,
            description: None,
            context: context.stage(stage),
            target_url: None,
        }
    }

    /// Returns the commit state.
    #[must_use]
    pub const fn state(&self) -> CommitState {
        self.state
    }

    /// Returns the human description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status context label.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns the target URL, if any.
    #[must_use]
    pub fn target_url(&self) -> Option<&str> {
        self.target_url.as_deref()
    }
}

/// Context labels under which statuses appear on the source host.
///
/// Pipeline-level statuses use the product label (`CodePipeline`); stage
/// statuses use its lowercase form followed by the stage name
/// (`codepipeline/Build`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusContext {
    pipeline: String,
    stage_prefix: String,
}

impl StatusContext {
    /// Creates contexts rooted at the given product label.
    #[must_use]
    pub fn new(product: impl Into<String>) -> Self {
        let pipeline = product.into();
        let stage_prefix = pipeline.to_lowercase();
        Self {
            pipeline,
            stage_prefix,
        }
    }

    /// Returns the pipeline-level context.
    #[must_use]
    pub fn pipeline(&self) -> &str {
        &self.pipeline
    }

    /// Returns the context for a single stage.
    #[must_use]
    pub fn stage(&self, stage: &StageName) -> String {
        format!("{}/{stage}", self.stage_prefix)
    }
}

impl Default for StatusContext {
    fn default() -> Self {
        Self::new("CodePipeline")
    }
}

/// Builder for human-facing control-plane console links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLink {
    region: String,
}

impl ConsoleLink {
    /// Creates a link builder for the given region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    /// Returns the region the links point at.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the console URL of a pipeline.
    #[must_use]
    pub fn pipeline_url(&self, pipeline: &PipelineName) -> String {
        format!(
            "https://{region}.console.aws.amazon.com/codesuite/codepipeline/pipelines/{pipeline}/view?region={region}",
            region = self.region
        )
    }
}
