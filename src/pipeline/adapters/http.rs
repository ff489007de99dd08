//! HTTP adapter posting commit statuses to the source host.

use crate::pipeline::{
    domain::{CommitStatus, SourceToken, StatusesUrl},
    ports::{CommitStatusPublishError, CommitStatusPublishResult, CommitStatusPublisher},
};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::debug;

const ACCEPT_VALUE: &str = "application/vnd.github+json";
const USER_AGENT_VALUE: &str = concat!("pr-pipeline-bridge/", env!("CARGO_PKG_VERSION"));

/// Posts statuses with `Authorization: Bearer <token>`.
///
/// No retries and no client-side timeout are configured; a failed post
/// surfaces immediately.
#[derive(Debug, Clone, Default)]
pub struct HttpStatusPublisher {
    client: reqwest::Client,
}

impl HttpStatusPublisher {
    /// Creates a publisher with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a publisher reusing an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommitStatusPublisher for HttpStatusPublisher {
    #[tracing::instrument(skip_all, fields(url = %url, state = %status.state(), context = status.context()))]
    async fn publish(
        &self,
        url: &StatusesUrl,
        token: &SourceToken,
        status: &CommitStatus,
    ) -> CommitStatusPublishResult<()> {
        let response = self
            .client
            .post(url.as_str())
            .bearer_auth(token.expose())
            .header(ACCEPT, ACCEPT_VALUE)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .json(status)
            .send()
            .await
            .map_err(CommitStatusPublishError::transport)?;

        let code = response.status();
        if !code.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CommitStatusPublishError::Rejected {
                status: code.as_u16(),
                body,
            });
        }

        debug!(status_code = code.as_u16(), "status accepted by source host");
        Ok(())
    }
}
