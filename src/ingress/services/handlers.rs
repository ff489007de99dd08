//! Composition of both routers from configuration and infrastructure ports.

use super::{StateChangeRouter, WebhookRouter};
use crate::{
    config::BridgeConfig,
    pipeline::{
        adapters::{ParameterCorrelationStore, ParameterCredentialStore},
        ports::{CommitStatusPublisher, ParameterStore, PipelineControlPlane},
        services::{PipelineLifecycleService, StateChangeNotifier},
    },
};
use std::sync::Arc;

type Correlation<R> = ParameterCorrelationStore<R>;
type Credentials<R> = ParameterCredentialStore<R>;

/// Both entry points wired over a shared control plane, parameter store,
/// and status publisher.
pub struct BridgeHandlers<P, R, N>
where
    P: PipelineControlPlane,
    R: ParameterStore,
    N: CommitStatusPublisher,
{
    /// Source-host webhook entry point.
    pub webhook: WebhookRouter<P, Correlation<R>, Credentials<R>, N>,
    /// Control-plane event entry point.
    pub state_change: StateChangeRouter<P, Correlation<R>, Credentials<R>, N>,
}

impl<P, R, N> BridgeHandlers<P, R, N>
where
    P: PipelineControlPlane,
    R: ParameterStore,
    N: CommitStatusPublisher,
{
    /// Builds both routers. Correlation entries and source tokens are kept in
    /// `parameters` under the configured namespace.
    #[must_use]
    pub fn new(
        config: &BridgeConfig,
        control_plane: Arc<P>,
        parameters: Arc<R>,
        publisher: Arc<N>,
    ) -> Self {
        let correlation = Arc::new(ParameterCorrelationStore::new(
            Arc::clone(&parameters),
            config.namespace(),
        ));
        let credentials = Arc::new(ParameterCredentialStore::new(
            parameters,
            config.namespace(),
        ));
        let lifecycle = PipelineLifecycleService::new(
            Arc::clone(&control_plane),
            Arc::clone(&correlation),
            Arc::clone(&credentials),
            Arc::clone(&publisher),
            config.bridge_settings(),
        );
        let notifier = StateChangeNotifier::new(
            control_plane,
            correlation,
            credentials,
            publisher,
            config.bridge_settings(),
        );
        Self {
            webhook: WebhookRouter::new(lifecycle),
            state_change: StateChangeRouter::new(notifier),
        }
    }
}
