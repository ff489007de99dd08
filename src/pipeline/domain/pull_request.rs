//! Pull request events that drive the pipeline lifecycle.

use super::{
    BranchName, InstanceName, PipelineDomainError, PullRequestNumber, RepositoryName,
    StatusesUrl, TemplateName,
};
use serde::Deserialize;
use serde_json::Value;

/// Webhook action of a pull request event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PullRequestAction {
    /// A pull request was opened.
    Opened,
    /// New commits were pushed to the pull request head.
    Synchronize,
    /// The pull request was closed or merged.
    Closed,
    /// Any other action; ignored by the lifecycle.
    Other(String),
}

impl PullRequestAction {
    /// Returns the webhook spelling of the action.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Opened => "opened",
            Self::Synchronize => "synchronize",
            Self::Closed => "closed",
            Self::Other(action) => action,
        }
    }
}

impl From<&str> for PullRequestAction {
    fn from(value: &str) -> Self {
        match value {
            "opened" => Self::Opened,
            "synchronize" => Self::Synchronize,
            "closed" => Self::Closed,
            other => Self::Other(other.to_owned()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    number: Option<u64>,
    pull_request: PullRequestBody,
}

#[derive(Debug, Deserialize)]
struct PullRequestBody {
    number: u64,
    head: HeadBody,
    statuses_url: String,
}

#[derive(Debug, Deserialize)]
struct HeadBody {
    #[serde(rename = "ref")]
    branch: String,
    repo: RepoBody,
}

#[derive(Debug, Deserialize)]
struct RepoBody {
    name: String,
}

/// Validated pull request identity extracted from a webhook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    number: PullRequestNumber,
    repository: RepositoryName,
    branch: BranchName,
    statuses_url: StatusesUrl,
}

impl PullRequestEvent {
    /// Creates an event from validated components.
    #[must_use]
    pub const fn new(
        number: PullRequestNumber,
        repository: RepositoryName,
        branch: BranchName,
        statuses_url: StatusesUrl,
    ) -> Self {
        Self {
            number,
            repository,
            branch,
            statuses_url,
        }
    }

    /// Creates an event from raw webhook values.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineDomainError`] when any component is invalid.
    pub fn from_parts(
        number: u64,
        repository: &str,
        branch: &str,
        statuses_url: &str,
    ) -> Result<Self, PipelineDomainError> {
        Ok(Self::new(
            PullRequestNumber::new(number)?,
            RepositoryName::new(repository)?,
            BranchName::new(branch)?,
            StatusesUrl::new(statuses_url)?,
        ))
    }

    /// Extracts the event from a decoded webhook body.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::InvalidPayload`] when required fields
    /// are missing, [`PipelineDomainError::InconsistentPullRequestNumber`]
    /// when the top-level and nested numbers disagree, or the validation
    /// error of an invalid component.
    pub fn from_payload(payload: &Value) -> Result<Self, PipelineDomainError> {
        let decoded = PullRequestPayload::deserialize(payload)
            .map_err(|err| PipelineDomainError::InvalidPayload(err.to_string()))?;
        let pull_request = decoded.pull_request;

        if let Some(event_number) = decoded.number
            && event_number != pull_request.number
        {
            return Err(PipelineDomainError::InconsistentPullRequestNumber {
                event: event_number,
                pull_request: pull_request.number,
            });
        }

        Self::from_parts(
            pull_request.number,
            &pull_request.head.repo.name,
            &pull_request.head.branch,
            &pull_request.statuses_url,
        )
    }

    /// Returns the pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    /// Returns the head repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the head branch.
    #[must_use]
    pub const fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Returns the statuses callback URL.
    #[must_use]
    pub const fn statuses_url(&self) -> &StatusesUrl {
        &self.statuses_url
    }

    /// Derives the pipeline instance name for this pull request.
    #[must_use]
    pub fn instance_name(&self, template: &TemplateName) -> InstanceName {
        InstanceName::new(template.clone(), self.number, self.repository.clone())
    }
}
