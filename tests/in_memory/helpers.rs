//! Shared helpers for in-memory bridge integration tests.

use std::sync::Arc;

use pr_pipeline_bridge::{
    config::BridgeConfig,
    ingress::{
        domain::{InboundRequest, SOURCE_HOST_EVENT_HEADER},
        services::BridgeHandlers,
    },
    pipeline::{
        adapters::memory::{
            InMemoryControlPlane, InMemoryParameterStore, PublishedStatus,
            RecordingStatusPublisher,
        },
        domain::{ParameterPath, PipelineDefinition},
    },
};
use rstest::fixture;
use serde_json::{Value, json};

/// Source token seeded for the `build` template.
pub const TOKEN: &str = "ghp_integration";

/// In-memory infrastructure plus the routers wired over it.
pub struct Bridge {
    pub control_plane: Arc<InMemoryControlPlane>,
    pub parameters: Arc<InMemoryParameterStore>,
    pub publisher: Arc<RecordingStatusPublisher>,
    pub handlers:
        BridgeHandlers<InMemoryControlPlane, InMemoryParameterStore, RecordingStatusPublisher>,
}

impl Bridge {
    /// Returns every status posted so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording publisher cannot be read.
    pub fn published(&self) -> Result<Vec<PublishedStatus>, eyre::Report> {
        Ok(self.publisher.published()?)
    }

    /// Returns the stored value at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter store cannot be read.
    pub fn parameter(&self, path: &str) -> Result<Option<String>, eyre::Report> {
        Ok(self.parameters.value(&ParameterPath::new(path))?)
    }
}

/// Provides a bridge configured for template `build` in `eu-west-1`, with the
/// template pipeline and its source token in place.
#[fixture]
pub fn bridge() -> Bridge {
    let config = BridgeConfig::from_lookup(|name| match name {
        "PIPELINE_NAME" => Some("build".to_owned()),
        "AWS_REGION" => Some("eu-west-1".to_owned()),
        _ => None,
    })
    .expect("configuration should load");
    let control_plane = Arc::new(InMemoryControlPlane::new());
    let parameters = Arc::new(InMemoryParameterStore::new());
    let publisher = Arc::new(RecordingStatusPublisher::new());

    control_plane
        .insert_pipeline(template_definition())
        .expect("template should be stored");
    parameters
        .insert(ParameterPath::new("/codepipeline/build/github_token"), TOKEN)
        .expect("token should be stored");

    let handlers = BridgeHandlers::new(
        &config,
        Arc::clone(&control_plane),
        Arc::clone(&parameters),
        Arc::clone(&publisher),
    );
    Bridge {
        control_plane,
        parameters,
        publisher,
        handlers,
    }
}

/// Template pipeline with a source stage and a build stage.
#[must_use]
pub fn template_definition() -> PipelineDefinition {
    PipelineDefinition::new(json!({
        "name": "build",
        "roleArn": "arn:aws:iam::123456789012:role/pipeline",
        "stages": [
            {
                "name": "Source",
                "actions": [{
                    "name": "Checkout",
                    "configuration": {
                        "Owner": "acme",
                        "Repo": "app",
                        "Branch": "main",
                        "OAuthToken": "****"
                    }
                }]
            },
            {"name": "Build", "actions": [{"name": "Compile", "configuration": {}}]}
        ]
    }))
}

/// Source-host webhook request for a pull request action.
#[must_use]
pub fn pull_request_webhook(action: &str, number: u64, repository: &str) -> InboundRequest {
    let body = json!({
        "action": action,
        "number": number,
        "pull_request": {
            "number": number,
            "head": {"ref": "feature-x", "repo": {"name": repository}},
            "statuses_url": format!("https://api.github.test/repos/acme/{repository}/statuses/sha{number}")
        }
    });
    InboundRequest::new(Some(body.to_string())).with_header(SOURCE_HOST_EVENT_HEADER, "pull_request")
}

/// Pipeline execution state-change event.
#[must_use]
pub fn execution_event(pipeline: &str, state: &str) -> Value {
    json!({
        "detail-type": "CodePipeline Pipeline Execution State Change",
        "time": "2024-05-01T08:00:00Z",
        "detail": {"pipeline": pipeline, "state": state, "execution-id": "exec-1"}
    })
}
