//! Wire shapes of inbound invocations and their responses.

mod events;
mod request;
mod response;

pub use events::{ControlPlaneEvent, StateChange, StateChangeDetail, StateChangeError};
pub use request::{InboundRequest, SOURCE_HOST_EVENT_HEADER};
pub use response::{ACKNOWLEDGED, HandlerResponse};
