//! Credential lookup port.

use crate::pipeline::domain::{SourceToken, TemplateName};
use crate::pipeline::ports::ParameterStoreError;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for credential lookups.
pub type CredentialStoreResult<T> = Result<T, CredentialStoreError>;

/// Source of the per-template source-host credential.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the token used to post statuses and to authenticate the
    /// source stage of pipelines cloned from `template`.
    async fn source_token(&self, template: &TemplateName) -> CredentialStoreResult<SourceToken>;
}

/// Errors returned by credential stores.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    /// No credential is configured for the template.
    #[error("no source token configured for template {0}")]
    Missing(TemplateName),

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] ParameterStoreError),
}
