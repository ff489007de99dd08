//! Shared harness wiring the services to in-memory adapters.

use std::sync::Arc;

use crate::pipeline::{
    adapters::{
        ParameterCorrelationStore, ParameterCredentialStore,
        memory::{InMemoryControlPlane, InMemoryParameterStore, RecordingStatusPublisher},
    },
    domain::{
        ConsoleLink, ParameterNamespace, PipelineDefinition, PullRequestEvent, TemplateName,
    },
    services::{BridgeSettings, PipelineLifecycleService, StateChangeNotifier},
};
use serde_json::json;

pub type TestCorrelation = ParameterCorrelationStore<InMemoryParameterStore>;
pub type TestCredentials = ParameterCredentialStore<InMemoryParameterStore>;

pub type TestLifecycle = PipelineLifecycleService<
    InMemoryControlPlane,
    TestCorrelation,
    TestCredentials,
    RecordingStatusPublisher,
>;

pub type TestNotifier =
    StateChangeNotifier<InMemoryControlPlane, TestCorrelation, TestCredentials, RecordingStatusPublisher>;

pub const TOKEN: &str = "ghp_test_token";
pub const REGION: &str = "eu-west-1";

/// In-memory collaborators plus both services built over them.
pub struct Harness {
    pub control_plane: Arc<InMemoryControlPlane>,
    pub parameters: Arc<InMemoryParameterStore>,
    pub publisher: Arc<RecordingStatusPublisher>,
    pub correlation: Arc<TestCorrelation>,
    pub lifecycle: TestLifecycle,
    pub notifier: TestNotifier,
}

pub fn template() -> TemplateName {
    TemplateName::new("build").expect("valid template name")
}

pub fn settings() -> BridgeSettings {
    BridgeSettings::new(template(), ConsoleLink::new(REGION))
}

pub fn template_definition() -> PipelineDefinition {
    PipelineDefinition::new(json!({
        "name": "build",
        "stages": [
            {
                "name": "Source",
                "actions": [{
                    "name": "Checkout",
                    "configuration": {"Branch": "main", "OAuthToken": "****"}
                }]
            },
            {"name": "Build", "actions": [{"name": "Compile", "configuration": {}}]}
        ]
    }))
}

pub fn pull_request(number: u64) -> PullRequestEvent {
    PullRequestEvent::from_parts(
        number,
        "app",
        "feature-x",
        &format!("https://host/statuses/pr-{number}"),
    )
    .expect("valid pull request event")
}

impl Harness {
    /// Builds a harness with the template pipeline and source token in place.
    pub fn seeded() -> Self {
        let harness = Self::empty();
        harness
            .control_plane
            .insert_pipeline(template_definition())
            .expect("template should be stored");
        harness
            .parameters
            .insert(ParameterNamespace::default().source_token(&template()), TOKEN)
            .expect("token should be stored");
        harness
    }

    /// Builds a harness with no pipelines and no parameters.
    pub fn empty() -> Self {
        let control_plane = Arc::new(InMemoryControlPlane::new());
        let parameters = Arc::new(InMemoryParameterStore::new());
        let publisher = Arc::new(RecordingStatusPublisher::new());
        let correlation = Arc::new(ParameterCorrelationStore::new(
            Arc::clone(&parameters),
            ParameterNamespace::default(),
        ));
        let credentials = Arc::new(ParameterCredentialStore::new(
            Arc::clone(&parameters),
            ParameterNamespace::default(),
        ));
        let lifecycle = PipelineLifecycleService::new(
            Arc::clone(&control_plane),
            Arc::clone(&correlation),
            Arc::clone(&credentials),
            Arc::clone(&publisher),
            settings(),
        );
        let notifier = StateChangeNotifier::new(
            Arc::clone(&control_plane),
            Arc::clone(&correlation),
            credentials,
            Arc::clone(&publisher),
            settings(),
        );
        Self {
            control_plane,
            parameters,
            publisher,
            correlation,
            lifecycle,
            notifier,
        }
    }
}
