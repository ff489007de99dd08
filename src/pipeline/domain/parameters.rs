//! Hierarchical parameter paths used for correlation and credentials.

use super::{PullRequestNumber, TemplateName};
use std::fmt;

const STATUS_URL_SEGMENT: &str = "status_url";
const TOKEN_SEGMENT: &str = "github_token";

/// Absolute path of a parameter in the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterPath(String);

impl ParameterPath {
    /// Wraps a raw parameter path.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the final `/`-delimited segment.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Returns `true` when this path lies strictly below `prefix`.
    #[must_use]
    pub fn is_below(&self, prefix: &Self) -> bool {
        self.0
            .strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
    }
}

impl fmt::Display for ParameterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root namespace under which per-template parameters live.
///
/// Layout:
///
/// - `/<root>/<template>/status_url/<pr_number>`: statuses URL per PR
/// - `/<root>/<template>/github_token`: source-host credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterNamespace {
    root: String,
}

impl ParameterNamespace {
    /// Creates a namespace rooted at `root` (leading and trailing slashes are
    /// ignored).
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into().trim_matches('/').to_owned(),
        }
    }

    /// Returns the namespace root without slashes.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the directory holding every statuses URL of a template.
    #[must_use]
    pub fn status_urls(&self, template: &TemplateName) -> ParameterPath {
        ParameterPath(format!("/{}/{template}/{STATUS_URL_SEGMENT}", self.root))
    }

    /// Returns the path of the statuses URL for one pull request.
    #[must_use]
    pub fn status_url(&self, template: &TemplateName, number: PullRequestNumber) -> ParameterPath {
        ParameterPath(format!("{}/{number}", self.status_urls(template)))
    }

    /// Returns the path of the source-host credential of a template.
    #[must_use]
    pub fn source_token(&self, template: &TemplateName) -> ParameterPath {
        ParameterPath(format!("/{}/{template}/{TOKEN_SEGMENT}", self.root))
    }
}

impl Default for ParameterNamespace {
    fn default() -> Self {
        Self::new("codepipeline")
    }
}
