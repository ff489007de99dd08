//! Per-pull-request pipeline instance naming.

use super::{
    PipelineDomainError, PipelineName, PullRequestNumber, RepositoryName, TemplateName,
    ids::TEMPLATE_DELIMITER,
};
use std::fmt;

const PULL_REQUEST_MARKER: &str = "PR-";
const REPOSITORY_MARKER: &str = "-Repo-";

/// Deterministic identity of a pipeline cloned for one pull request.
///
/// Canonical form: `"{template}_PR-{number}-Repo-{repository}"`. This is the
/// only identity used for control-plane lookups; no instance table exists.
///
/// # Examples
///
///     use pr_pipeline_bridge::pipeline::domain::InstanceName;
///
///     let instance = InstanceName::parse("tmpl_PR-42-Repo-foo").expect("valid");
///     assert_eq!(instance.template().as_str(), "tmpl");
///     assert_eq!(instance.pull_request_number().value(), 42);
///     assert_eq!(instance.to_string(), "tmpl_PR-42-Repo-foo");
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceName {
    template: TemplateName,
    pull_request_number: PullRequestNumber,
    repository: RepositoryName,
}

impl InstanceName {
    /// Creates an instance name from validated components.
    #[must_use]
    pub const fn new(
        template: TemplateName,
        pull_request_number: PullRequestNumber,
        repository: RepositoryName,
    ) -> Self {
        Self {
            template,
            pull_request_number,
            repository,
        }
    }

    /// Parses the canonical form back into its components.
    ///
    /// The template ends at the first `_` and the PR number ends at the first
    /// `-Repo-`; everything after that marker is the repository name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::InvalidInstanceName`] when the input
    /// does not match the canonical form.
    pub fn parse(value: &str) -> Result<Self, PipelineDomainError> {
        let invalid = || PipelineDomainError::InvalidInstanceName(value.to_owned());

        let (template_str, rest) = value.split_once(TEMPLATE_DELIMITER).ok_or_else(invalid)?;
        let rest = rest.strip_prefix(PULL_REQUEST_MARKER).ok_or_else(invalid)?;
        let (number_str, repository_str) = rest.split_once(REPOSITORY_MARKER).ok_or_else(invalid)?;

        if number_str.is_empty() || !number_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u64 = number_str.parse().map_err(|_| invalid())?;

        Ok(Self::new(
            TemplateName::new(template_str).map_err(|_| invalid())?,
            PullRequestNumber::new(number).map_err(|_| invalid())?,
            RepositoryName::new(repository_str).map_err(|_| invalid())?,
        ))
    }

    /// Returns the template the instance was cloned from.
    #[must_use]
    pub const fn template(&self) -> &TemplateName {
        &self.template
    }

    /// Returns the pull request number encoded in the name.
    #[must_use]
    pub const fn pull_request_number(&self) -> PullRequestNumber {
        self.pull_request_number
    }

    /// Returns the repository name encoded in the name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the control-plane pipeline name for this instance.
    #[must_use]
    pub fn pipeline_name(&self) -> PipelineName {
        PipelineName::new(self.to_string())
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{TEMPLATE_DELIMITER}{PULL_REQUEST_MARKER}{}{REPOSITORY_MARKER}{}",
            self.template, self.pull_request_number, self.repository
        )
    }
}

impl TryFrom<&str> for InstanceName {
    type Error = PipelineDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
