//! Port for posting commit statuses to the source host.

use crate::pipeline::domain::{CommitStatus, SourceToken, StatusesUrl};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for status publication.
pub type CommitStatusPublishResult<T> = Result<T, CommitStatusPublishError>;

/// Source-host commit status sink.
#[async_trait]
pub trait CommitStatusPublisher: Send + Sync {
    /// Posts one status to the statuses URL, authenticated with `token`.
    async fn publish(
        &self,
        url: &StatusesUrl,
        token: &SourceToken,
        status: &CommitStatus,
    ) -> CommitStatusPublishResult<()>;
}

/// Errors returned while publishing commit statuses.
#[derive(Debug, Clone, Error)]
pub enum CommitStatusPublishError {
    /// The source host answered with a non-success status code.
    #[error("source host rejected status with HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The request could not be delivered.
    #[error("status delivery failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommitStatusPublishError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
