//! Port contracts for the pipeline bridge.
//!
//! Ports define infrastructure-agnostic interfaces used by the lifecycle and
//! notification services.

pub mod control_plane;
pub mod correlation;
pub mod credentials;
pub mod parameter_store;
pub mod status_publisher;

pub use control_plane::{ControlPlaneError, ControlPlaneResult, Lookup, PipelineControlPlane};
pub use correlation::{CorrelationStore, CorrelationStoreError, CorrelationStoreResult};
pub use credentials::{CredentialStore, CredentialStoreError, CredentialStoreResult};
pub use parameter_store::{Parameter, ParameterStore, ParameterStoreError, ParameterStoreResult};
pub use status_publisher::{
    CommitStatusPublishError, CommitStatusPublishResult, CommitStatusPublisher,
};
