//! Correlation and credential stores backed by the parameter store.

use crate::pipeline::{
    domain::{ParameterNamespace, PullRequestNumber, SourceToken, StatusesUrl, TemplateName},
    ports::{
        CorrelationStore, CorrelationStoreError, CorrelationStoreResult, CredentialStore,
        CredentialStoreError, CredentialStoreResult, ParameterStore, ParameterStoreError,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Correlation store persisting statuses URLs as plain parameters under
/// `/<root>/<template>/status_url/<pr_number>`.
#[derive(Debug, Clone)]
pub struct ParameterCorrelationStore<P>
where
    P: ParameterStore,
{
    store: Arc<P>,
    namespace: ParameterNamespace,
}

impl<P> ParameterCorrelationStore<P>
where
    P: ParameterStore,
{
    /// Creates a correlation store over `store`.
    #[must_use]
    pub const fn new(store: Arc<P>, namespace: ParameterNamespace) -> Self {
        Self { store, namespace }
    }
}

#[async_trait]
impl<P> CorrelationStore for ParameterCorrelationStore<P>
where
    P: ParameterStore,
{
    async fn put(
        &self,
        template: &TemplateName,
        number: PullRequestNumber,
        url: &StatusesUrl,
    ) -> CorrelationStoreResult<()> {
        let path = self.namespace.status_url(template, number);
        debug!(path = %path, "storing statuses URL");
        self.store.put(&path, url.as_str()).await?;
        Ok(())
    }

    async fn get_latest(&self, template: &TemplateName) -> CorrelationStoreResult<StatusesUrl> {
        let prefix = self.namespace.status_urls(template);
        let entries = self.store.list_by_path(&prefix).await?;

        let mut latest: Option<(u64, String)> = None;
        for entry in entries {
            let Ok(number) = entry.path.last_segment().parse::<u64>() else {
                warn!(path = %entry.path, "ignoring statuses URL entry with non-numeric suffix");
                continue;
            };
            if latest.as_ref().is_none_or(|(best, _)| number > *best) {
                latest = Some((number, entry.value));
            }
        }

        let (_, value) = latest.ok_or_else(|| CorrelationStoreError::NoEntries(template.clone()))?;
        StatusesUrl::new(value).map_err(|err| CorrelationStoreError::InvalidEntry(err.to_string()))
    }

    async fn delete(
        &self,
        template: &TemplateName,
        number: PullRequestNumber,
    ) -> CorrelationStoreResult<()> {
        let path = self.namespace.status_url(template, number);
        match self.store.delete(&path).await {
            Ok(()) => Ok(()),
            Err(ParameterStoreError::NotFound(_)) => Err(CorrelationStoreError::NotFound {
                template: template.clone(),
                number,
            }),
            Err(err) => Err(err.into()),
        }
    }
}

/// Credential store reading the decrypted token at
/// `/<root>/<template>/github_token`.
#[derive(Debug, Clone)]
pub struct ParameterCredentialStore<P>
where
    P: ParameterStore,
{
    store: Arc<P>,
    namespace: ParameterNamespace,
}

impl<P> ParameterCredentialStore<P>
where
    P: ParameterStore,
{
    /// Creates a credential store over `store`.
    #[must_use]
    pub const fn new(store: Arc<P>, namespace: ParameterNamespace) -> Self {
        Self { store, namespace }
    }
}

#[async_trait]
impl<P> CredentialStore for ParameterCredentialStore<P>
where
    P: ParameterStore,
{
    async fn source_token(&self, template: &TemplateName) -> CredentialStoreResult<SourceToken> {
        let path = self.namespace.source_token(template);
        match self.store.get_decrypted(&path).await {
            Ok(value) => Ok(SourceToken::new(value)),
            Err(ParameterStoreError::NotFound(_)) => {
                Err(CredentialStoreError::Missing(template.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
