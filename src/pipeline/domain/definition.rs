//! Pipeline declarations as exchanged with the control plane.

use super::{BranchName, InstanceName, PipelineDomainError, PipelineName, SourceToken};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const NAME_POINTER: &str = "/name";
const SOURCE_CONFIGURATION_POINTER: &str = "/stages/0/actions/0/configuration";
const TOKEN_FIELD: &str = "OAuthToken";
const BRANCH_FIELD: &str = "Branch";

/// Control-plane pipeline declaration.
///
/// The document is kept as JSON so fields this crate does not touch survive
/// a clone unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineDefinition(Value);

impl PipelineDefinition {
    /// Wraps a pipeline declaration.
    #[must_use]
    pub const fn new(document: Value) -> Self {
        Self(document)
    }

    /// Returns the declared pipeline name, if present.
    #[must_use]
    pub fn name(&self) -> Option<PipelineName> {
        self.0
            .pointer(NAME_POINTER)
            .and_then(Value::as_str)
            .map(PipelineName::new)
    }

    /// Returns the branch configured on the source action, if present.
    #[must_use]
    pub fn source_branch(&self) -> Option<&str> {
        self.source_field(BRANCH_FIELD)
    }

    /// Returns the token configured on the source action, if present.
    #[must_use]
    pub fn source_token(&self) -> Option<&str> {
        self.source_field(TOKEN_FIELD)
    }

    /// Returns the underlying JSON document.
    #[must_use]
    pub const fn as_json(&self) -> &Value {
        &self.0
    }

    /// Clones the template into a per-PR declaration.
    ///
    /// Exactly three fields change: the pipeline name, and the token and
    /// branch of the first action in the first stage.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::MalformedDefinition`] when the document
    /// is not an object or has no source-action configuration object.
    pub fn clone_for_instance(
        &self,
        instance: &InstanceName,
        token: &SourceToken,
        branch: &BranchName,
    ) -> Result<Self, PipelineDomainError> {
        let mut document = self.0.clone();

        let root = document
            .as_object_mut()
            .ok_or_else(|| PipelineDomainError::MalformedDefinition("pipeline object".to_owned()))?;
        root.insert("name".to_owned(), Value::String(instance.to_string()));

        let configuration = document
            .pointer_mut(SOURCE_CONFIGURATION_POINTER)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                PipelineDomainError::MalformedDefinition(
                    "stages[0].actions[0].configuration".to_owned(),
                )
            })?;
        configuration.insert(TOKEN_FIELD.to_owned(), Value::String(token.expose().to_owned()));
        configuration.insert(BRANCH_FIELD.to_owned(), Value::String(branch.as_str().to_owned()));

        Ok(Self(document))
    }

    fn source_field(&self, field: &str) -> Option<&str> {
        self.0
            .pointer(SOURCE_CONFIGURATION_POINTER)
            .and_then(|configuration| configuration.get(field))
            .and_then(Value::as_str)
    }
}
