//! Domain model for per-pull-request pipelines.
//!
//! Covers instance naming, the status vocabulary shared with the source
//! host, template cloning, and parameter layout. Infrastructure concerns stay
//! outside of this boundary.

mod commit_status;
mod definition;
mod error;
mod ids;
mod instance;
mod parameters;
mod pull_request;
mod status;

pub use commit_status::{CommitStatus, ConsoleLink, StatusContext};
pub use definition::PipelineDefinition;
pub use error::{ParsePipelineStatusError, PipelineDomainError};
pub use ids::{
    BranchName, ExecutionId, PipelineName, PullRequestNumber, RepositoryName, SourceToken,
    StageName, StatusesUrl, TemplateName,
};
pub use instance::InstanceName;
pub use parameters::{ParameterNamespace, ParameterPath};
pub use pull_request::{PullRequestAction, PullRequestEvent};
pub use status::{CommitState, PipelineStatus, StageExecutionStatus, StageState};
