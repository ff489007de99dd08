//! Identifier and validated scalar types for the pipeline domain.

use super::PipelineDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delimiter separating the template name from the rest of an instance name.
pub(crate) const TEMPLATE_DELIMITER: char = '_';

/// Name of the template pipeline that per-PR instances are cloned from.
///
/// The name may not contain `_`, which separates the template from the pull
/// request suffix in instance names.
///
/// # Examples
///
///     use pr_pipeline_bridge::pipeline::domain::TemplateName;
///
///     let template = TemplateName::new("build").expect("valid");
///     assert_eq!(template.as_str(), "build");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    /// Creates a validated template name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EmptyTemplateName`] when the value is
    /// blank or [`PipelineDomainError::InvalidTemplateName`] when it contains
    /// the instance-name delimiter.
    pub fn new(value: impl Into<String>) -> Result<Self, PipelineDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(PipelineDomainError::EmptyTemplateName);
        }
        if normalized.contains(TEMPLATE_DELIMITER) {
            return Err(PipelineDomainError::InvalidTemplateName(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Derives the template name from any pipeline name.
    ///
    /// Takes the first `_`-delimited segment, so both `build` and
    /// `build_PR-5-Repo-app` resolve to `build`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EmptyTemplateName`] when the leading
    /// segment is blank.
    pub fn from_pipeline_name(name: &PipelineName) -> Result<Self, PipelineDomainError> {
        let first = name
            .as_str()
            .split(TEMPLATE_DELIMITER)
            .next()
            .unwrap_or_default();
        Self::new(first)
    }

    /// Returns the template name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the control-plane name of the template pipeline itself.
    #[must_use]
    pub fn pipeline_name(&self) -> PipelineName {
        PipelineName(self.0.clone())
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Any pipeline name known to the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineName(String);

impl PipelineName {
    /// Wraps a pipeline name reported by the control plane.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the pipeline name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PipelineName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PipelineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive pull request number from the source host.
///
/// # Examples
///
///     use pr_pipeline_bridge::pipeline::domain::PullRequestNumber;
///
///     let pr_num = PullRequestNumber::new(42).expect("valid");
///     assert_eq!(pr_num.value(), 42);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Creates a validated pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::InvalidPullRequestNumber`] when the
    /// value is zero.
    pub const fn new(value: u64) -> Result<Self, PipelineDomainError> {
        if value == 0 {
            return Err(PipelineDomainError::InvalidPullRequestNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short repository name as reported in `pull_request.head.repo.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Creates a validated repository name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EmptyRepositoryName`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, PipelineDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(PipelineDomainError::EmptyRepositoryName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the repository name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Head branch of a pull request, used as the cloned pipeline's source branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// Creates a validated branch reference.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EmptyBranch`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, PipelineDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(PipelineDomainError::EmptyBranch);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the branch name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a stage within a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageName(String);

impl StageName {
    /// Creates a validated stage name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EmptyStageName`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, PipelineDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(PipelineDomainError::EmptyStageName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the stage name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source-host endpoint accepting commit status updates for a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusesUrl(String);

impl StatusesUrl {
    /// Creates a validated statuses URL.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::InvalidStatusesUrl`] when the value is
    /// not an `http://` or `https://` URL.
    pub fn new(value: impl Into<String>) -> Result<Self, PipelineDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let has_scheme = normalized.starts_with("https://") || normalized.starts_with("http://");
        if !has_scheme || normalized.chars().any(char::is_whitespace) {
            return Err(PipelineDomainError::InvalidStatusesUrl(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the URL as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusesUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Execution identifier returned by the control plane when a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionId(String);

impl ExecutionId {
    /// Wraps an execution identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Credential used to post statuses and to authenticate the source stage.
///
/// The `Debug` output never includes the secret value.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceToken(String);

impl SourceToken {
    /// Wraps a token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SourceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SourceToken(<redacted>)")
    }
}
