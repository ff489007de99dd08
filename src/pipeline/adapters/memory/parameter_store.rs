//! In-memory parameter store for tests and local dry runs.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::pipeline::{
    domain::ParameterPath,
    ports::{Parameter, ParameterStore, ParameterStoreError, ParameterStoreResult},
};

/// Thread-safe in-memory parameter store.
///
/// Secure and plain values are stored alike; `get_decrypted` simply returns
/// the stored value.
#[derive(Debug, Clone, Default)]
pub struct InMemoryParameterStore {
    parameters: Arc<RwLock<BTreeMap<ParameterPath, String>>>,
}

impl InMemoryParameterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a parameter outside of the port contract.
    ///
    /// # Errors
    ///
    /// Returns store errors when lock acquisition fails.
    pub fn insert(&self, path: ParameterPath, value: impl Into<String>) -> ParameterStoreResult<()> {
        let mut parameters = self.parameters.write().map_err(poisoned)?;
        parameters.insert(path, value.into());
        Ok(())
    }

    /// Returns a stored value without going through the port.
    ///
    /// # Errors
    ///
    /// Returns store errors when lock acquisition fails.
    pub fn value(&self, path: &ParameterPath) -> ParameterStoreResult<Option<String>> {
        let parameters = self.parameters.read().map_err(poisoned)?;
        Ok(parameters.get(path).cloned())
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> ParameterStoreError {
    ParameterStoreError::remote(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ParameterStore for InMemoryParameterStore {
    async fn put(&self, path: &ParameterPath, value: &str) -> ParameterStoreResult<()> {
        let mut parameters = self.parameters.write().map_err(poisoned)?;
        parameters.insert(path.clone(), value.to_owned());
        Ok(())
    }

    async fn get_decrypted(&self, path: &ParameterPath) -> ParameterStoreResult<String> {
        let parameters = self.parameters.read().map_err(poisoned)?;
        parameters
            .get(path)
            .cloned()
            .ok_or_else(|| ParameterStoreError::NotFound(path.clone()))
    }

    async fn list_by_path(&self, prefix: &ParameterPath) -> ParameterStoreResult<Vec<Parameter>> {
        let parameters = self.parameters.read().map_err(poisoned)?;
        Ok(parameters
            .iter()
            .filter(|(path, _)| path.is_below(prefix))
            .map(|(path, value)| Parameter::new(path.clone(), value.clone()))
            .collect())
    }

    async fn delete(&self, path: &ParameterPath) -> ParameterStoreResult<()> {
        let mut parameters = self.parameters.write().map_err(poisoned)?;
        parameters
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| ParameterStoreError::NotFound(path.clone()))
    }
}
