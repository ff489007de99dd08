//! Response returned to the hosting gateway.

use serde::{Deserialize, Serialize};

/// Body of the no-op acknowledgment.
pub const ACKNOWLEDGED: &str = "success";

/// Status code and body of a handled invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Plain-text body.
    pub body: String,
}

impl HandlerResponse {
    /// Builds a `200` response.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    /// Builds a `500` response.
    #[must_use]
    pub fn server_error(body: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: body.into(),
        }
    }

    /// Builds the `200` / `"success"` acknowledgment.
    #[must_use]
    pub fn acknowledged() -> Self {
        Self::ok(ACKNOWLEDGED)
    }
}
