//! Correlation store port linking pull requests to their statuses URL.

use crate::pipeline::domain::{PullRequestNumber, StatusesUrl, TemplateName};
use crate::pipeline::ports::ParameterStoreError;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for correlation store operations.
pub type CorrelationStoreResult<T> = Result<T, CorrelationStoreError>;

/// Persistence of `(template, pr_number) -> statuses URL` entries.
#[async_trait]
pub trait CorrelationStore: Send + Sync {
    /// Stores the statuses URL for a pull request, overwriting any previous
    /// entry.
    async fn put(
        &self,
        template: &TemplateName,
        number: PullRequestNumber,
        url: &StatusesUrl,
    ) -> CorrelationStoreResult<()>;

    /// Returns the statuses URL of the numerically greatest pull request
    /// stored for the template.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::NoEntries`] when the template has no
    /// usable entry.
    async fn get_latest(&self, template: &TemplateName) -> CorrelationStoreResult<StatusesUrl>;

    /// Removes the entry of a single pull request.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::NotFound`] when no entry exists.
    async fn delete(
        &self,
        template: &TemplateName,
        number: PullRequestNumber,
    ) -> CorrelationStoreResult<()>;
}

/// Errors returned by correlation store implementations.
#[derive(Debug, Clone, Error)]
pub enum CorrelationStoreError {
    /// No entry exists for the pull request.
    #[error("no statuses URL stored for {template} PR {number}")]
    NotFound {
        /// Template name.
        template: TemplateName,
        /// Pull request number.
        number: PullRequestNumber,
    },

    /// The template has no entries at all.
    #[error("no statuses URL stored for template {0}")]
    NoEntries(TemplateName),

    /// A stored value is not a valid statuses URL.
    #[error("stored statuses URL is invalid: {0}")]
    InvalidEntry(String),

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] ParameterStoreError),
}
