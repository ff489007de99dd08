//! Error types for pipeline domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing pipeline domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineDomainError {
    /// The template pipeline name is empty after trimming.
    #[error("template pipeline name must not be empty")]
    EmptyTemplateName,

    /// The template pipeline name contains the instance-name delimiter.
    #[error("template pipeline name '{0}' must not contain '_'")]
    InvalidTemplateName(String),

    /// The pull request number is not a positive integer.
    #[error("invalid pull request number {0}, expected a positive integer")]
    InvalidPullRequestNumber(u64),

    /// The top-level and nested pull request numbers disagree.
    #[error("pull request number mismatch: event carries {event}, pull request carries {pull_request}")]
    InconsistentPullRequestNumber {
        /// Top-level `number` field.
        event: u64,
        /// `pull_request.number` field.
        pull_request: u64,
    },

    /// The repository name is empty after trimming.
    #[error("repository name must not be empty")]
    EmptyRepositoryName,

    /// The branch reference is empty after trimming.
    #[error("branch reference must not be empty")]
    EmptyBranch,

    /// The stage name is empty after trimming.
    #[error("stage name must not be empty")]
    EmptyStageName,

    /// The statuses URL does not have an `http://` or `https://` prefix.
    #[error("statuses URL '{0}' must start with 'http://' or 'https://'")]
    InvalidStatusesUrl(String),

    /// The instance name does not follow the canonical format.
    #[error("invalid pipeline instance name '{0}', expected <template>_PR-<number>-Repo-<repository>")]
    InvalidInstanceName(String),

    /// The pipeline definition lacks a field that cloning must override.
    #[error("malformed pipeline definition: missing {0}")]
    MalformedDefinition(String),

    /// The pull request payload could not be decoded.
    #[error("invalid pull request payload: {0}")]
    InvalidPayload(String),
}

/// Error returned while parsing a pipeline status reported by the control plane.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pipeline status: {0}")]
pub struct ParsePipelineStatusError(pub String);
