//! HTTP-shaped inbound request.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Header whose presence marks a request as a source-host webhook.
pub const SOURCE_HOST_EVENT_HEADER: &str = "X-GitHub-Event";

/// Inbound request as delivered by the hosting gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundRequest {
    /// Request headers as sent; names keep their original case.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headers: BTreeMap<String, String>,
    /// Raw request body.
    #[serde(default)]
    pub body: Option<String>,
}

/// Gateways send `"headers": null` for requests without headers.
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl InboundRequest {
    /// Creates a request from a raw body and no headers.
    #[must_use]
    pub fn new(body: Option<String>) -> Self {
        Self {
            headers: BTreeMap::new(),
            body,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns a header value, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Reports whether the request is a source-host webhook.
    #[must_use]
    pub fn is_source_host_event(&self) -> bool {
        self.header(SOURCE_HOST_EVENT_HEADER).is_some()
    }

    /// Parses the body as JSON, returning `None` when absent or malformed.
    #[must_use]
    pub fn json_body(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}
