//! In-memory adapters for every pipeline port.

mod control_plane;
mod parameter_store;
mod status_publisher;

pub use control_plane::InMemoryControlPlane;
pub use parameter_store::InMemoryParameterStore;
pub use status_publisher::{PublishedStatus, RecordingStatusPublisher};
