//! Recording status publisher for tests.

use crate::pipeline::{
    domain::{CommitStatus, SourceToken, StatusesUrl},
    ports::{CommitStatusPublishError, CommitStatusPublishResult, CommitStatusPublisher},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// A status captured by [`RecordingStatusPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedStatus {
    /// Target statuses URL.
    pub url: StatusesUrl,
    /// Token the request was authenticated with.
    pub token: SourceToken,
    /// Posted payload.
    pub status: CommitStatus,
}

/// Status publisher that records every post instead of sending it.
///
/// Can be switched to reject posts to exercise failure handling.
#[derive(Debug, Clone, Default)]
pub struct RecordingStatusPublisher {
    state: Arc<RwLock<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    published: Vec<PublishedStatus>,
    rejection: Option<u16>,
}

fn poisoned<E: std::fmt::Display>(err: E) -> CommitStatusPublishError {
    CommitStatusPublishError::transport(std::io::Error::other(err.to_string()))
}

impl RecordingStatusPublisher {
    /// Creates a publisher that accepts every post.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent posts fail with the given HTTP status code.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn reject_with(&self, status: u16) -> CommitStatusPublishResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.rejection = Some(status);
        Ok(())
    }

    /// Returns every accepted post, in order.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn published(&self) -> CommitStatusPublishResult<Vec<PublishedStatus>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.published.clone())
    }
}

#[async_trait]
impl CommitStatusPublisher for RecordingStatusPublisher {
    async fn publish(
        &self,
        url: &StatusesUrl,
        token: &SourceToken,
        status: &CommitStatus,
    ) -> CommitStatusPublishResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if let Some(code) = state.rejection {
            return Err(CommitStatusPublishError::Rejected {
                status: code,
                body: "rejected by recording publisher".to_owned(),
            });
        }
        state.published.push(PublishedStatus {
            url: url.clone(),
            token: token.clone(),
            status: status.clone(),
        });
        Ok(())
    }
}
