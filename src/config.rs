//! Bridge configuration read from the process environment.
//!
//! Values are resolved through an injectable lookup function so tests can
//! supply a fixed environment without touching process state.

use crate::{
    pipeline::{
        domain::{ConsoleLink, ParameterNamespace, StatusContext, TemplateName},
        services::BridgeSettings,
    },
    telemetry::LogFormat,
};
use thiserror::Error;

/// Template pipeline name.
pub const PIPELINE_NAME_VAR: &str = "PIPELINE_NAME";
/// Region used for console links.
pub const REGION_VAR: &str = "region";
/// Fallback region variable set by the hosting runtime.
pub const REGION_FALLBACK_VAR: &str = "AWS_REGION";
/// First segment of parameter paths.
pub const PARAMETER_ROOT_VAR: &str = "PARAMETER_ROOT";
/// Context label of pipeline-level statuses.
pub const STATUS_CONTEXT_VAR: &str = "STATUS_CONTEXT";
/// Log layout, `json` or `text`.
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

const DEFAULT_PARAMETER_ROOT: &str = "codepipeline";
const DEFAULT_STATUS_CONTEXT: &str = "CodePipeline";

/// Configuration failures. Both variants are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
    /// A variable is set to an unusable value.
    #[error("environment variable {name} is invalid: {reason}")]
    Invalid {
        /// Offending variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Resolved bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    template: TemplateName,
    region: String,
    parameter_root: String,
    status_context: String,
    log_format: LogFormat,
}

impl BridgeConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a
    /// variable or `None` when unset. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the template name or region is
    /// absent, and [`ConfigError::Invalid`] when the template name or log
    /// format cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let raw_template = read(PIPELINE_NAME_VAR).ok_or(ConfigError::Missing(PIPELINE_NAME_VAR))?;
        let template = TemplateName::new(raw_template).map_err(|err| ConfigError::Invalid {
            name: PIPELINE_NAME_VAR,
            reason: err.to_string(),
        })?;

        let region = read(REGION_VAR)
            .or_else(|| read(REGION_FALLBACK_VAR))
            .ok_or(ConfigError::Missing(REGION_VAR))?;

        let log_format = read(LOG_FORMAT_VAR)
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()
            .map_err(|err| ConfigError::Invalid {
                name: LOG_FORMAT_VAR,
                reason: err.to_string(),
            })?
            .unwrap_or_default();

        Ok(Self {
            template,
            region,
            parameter_root: read(PARAMETER_ROOT_VAR)
                .unwrap_or_else(|| DEFAULT_PARAMETER_ROOT.to_owned()),
            status_context: read(STATUS_CONTEXT_VAR)
                .unwrap_or_else(|| DEFAULT_STATUS_CONTEXT.to_owned()),
            log_format,
        })
    }

    /// Returns the template pipeline name.
    #[must_use]
    pub const fn template(&self) -> &TemplateName {
        &self.template
    }

    /// Returns the region used for console links.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the configured log layout.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the parameter namespace rooted at the configured product.
    #[must_use]
    pub fn namespace(&self) -> ParameterNamespace {
        ParameterNamespace::new(self.parameter_root.as_str())
    }

    /// Returns the settings shared by the lifecycle and notification services.
    #[must_use]
    pub fn bridge_settings(&self) -> BridgeSettings {
        BridgeSettings::new(self.template.clone(), ConsoleLink::new(self.region.as_str()))
            .with_context(StatusContext::new(self.status_context.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        move |name| values.get(name).cloned()
    }

    #[rstest]
    fn defaults_apply_when_optional_values_are_unset() {
        let config = BridgeConfig::from_lookup(lookup(&[
            ("PIPELINE_NAME", "build"),
            ("region", "eu-west-1"),
        ]))
        .expect("config should load");

        assert_eq!(config.template().as_str(), "build");
        assert_eq!(config.region(), "eu-west-1");
        assert_eq!(config.log_format(), LogFormat::Text);
        assert_eq!(config.namespace(), ParameterNamespace::default());
        assert_eq!(config.bridge_settings().context, StatusContext::default());
    }

    #[rstest]
    fn region_falls_back_to_runtime_variable() {
        let config = BridgeConfig::from_lookup(lookup(&[
            ("PIPELINE_NAME", "build"),
            ("AWS_REGION", "us-east-2"),
        ]))
        .expect("config should load");

        assert_eq!(config.region(), "us-east-2");
        assert_eq!(config.bridge_settings().console.region(), "us-east-2");
    }

    #[rstest]
    fn explicit_region_wins_over_fallback() {
        let config = BridgeConfig::from_lookup(lookup(&[
            ("PIPELINE_NAME", "build"),
            ("region", "eu-west-1"),
            ("AWS_REGION", "us-east-2"),
        ]))
        .expect("config should load");

        assert_eq!(config.region(), "eu-west-1");
    }

    #[rstest]
    #[case(&[("region", "eu-west-1")], "PIPELINE_NAME")]
    #[case(&[("PIPELINE_NAME", "build")], "region")]
    #[case(&[("PIPELINE_NAME", "  "), ("region", "eu-west-1")], "PIPELINE_NAME")]
    fn missing_required_values_are_fatal(
        #[case] pairs: &[(&str, &str)],
        #[case] expected: &'static str,
    ) {
        assert_eq!(
            BridgeConfig::from_lookup(lookup(pairs)),
            Err(ConfigError::Missing(expected))
        );
    }

    #[rstest]
    fn template_containing_delimiter_is_invalid() {
        let result = BridgeConfig::from_lookup(lookup(&[
            ("PIPELINE_NAME", "build_main"),
            ("region", "eu-west-1"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "PIPELINE_NAME",
                ..
            })
        ));
    }

    #[rstest]
    fn overrides_flow_into_settings_and_namespace() {
        let config = BridgeConfig::from_lookup(lookup(&[
            ("PIPELINE_NAME", "build"),
            ("region", "eu-west-1"),
            ("PARAMETER_ROOT", "/ci/"),
            ("STATUS_CONTEXT", "Pipelines"),
            ("LOG_FORMAT", "json"),
        ]))
        .expect("config should load");

        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.namespace().root(), "ci");
        assert_eq!(config.bridge_settings().context, StatusContext::new("Pipelines"));
    }

    #[rstest]
    fn unknown_log_format_is_invalid() {
        let result = BridgeConfig::from_lookup(lookup(&[
            ("PIPELINE_NAME", "build"),
            ("region", "eu-west-1"),
            ("LOG_FORMAT", "pretty"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "LOG_FORMAT",
                ..
            })
        ));
    }
}
