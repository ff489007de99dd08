//! Key-value parameter store port.

use crate::pipeline::domain::ParameterPath;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for parameter store operations.
pub type ParameterStoreResult<T> = Result<T, ParameterStoreError>;

/// A stored parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Absolute parameter path.
    pub path: ParameterPath,
    /// Stored value.
    pub value: String,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(path: ParameterPath, value: impl Into<String>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}

/// Hierarchical key-value store contract.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Writes a plain string parameter, replacing any existing value.
    async fn put(&self, path: &ParameterPath, value: &str) -> ParameterStoreResult<()>;

    /// Reads a parameter, decrypting secure values.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterStoreError::NotFound`] when the path is absent.
    async fn get_decrypted(&self, path: &ParameterPath) -> ParameterStoreResult<String>;

    /// Lists every parameter below `prefix`.
    async fn list_by_path(&self, prefix: &ParameterPath) -> ParameterStoreResult<Vec<Parameter>>;

    /// Deletes a single parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterStoreError::NotFound`] when the path is absent.
    async fn delete(&self, path: &ParameterPath) -> ParameterStoreResult<()>;
}

/// Errors returned by parameter store adapters.
#[derive(Debug, Clone, Error)]
pub enum ParameterStoreError {
    /// The parameter does not exist.
    #[error("parameter not found: {0}")]
    NotFound(ParameterPath),

    /// Any other remote failure.
    #[error("parameter store error: {0}")]
    Remote(Arc<dyn std::error::Error + Send + Sync>),
}

impl ParameterStoreError {
    /// Wraps a remote failure.
    pub fn remote(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Remote(Arc::new(err))
    }
}
