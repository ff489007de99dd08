//! Tracing subscriber installation.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, fmt as fmt_layer, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

const DEFAULT_FILTER: &str = "info";

/// Output layout of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per event, fields flattened.
    Json,
}

impl LogFormat {
    /// Returns the configuration spelling of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a log format name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log format: {0}")]
pub struct ParseLogFormatError(pub String);

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ParseLogFormatError(value.to_owned())),
        }
    }
}

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Installs the global tracing subscriber.
///
/// The filter is read from `RUST_LOG` and falls back to `info` when unset or
/// unparsable.
///
/// # Errors
///
/// Returns [`TelemetryError::Init`] when a global subscriber has already been
/// installed.
pub fn init_tracing(format: LogFormat) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt_layer::layer().json().flatten_event(true))
            .try_init()?,
        LogFormat::Text => registry.with(fmt_layer::layer().with_target(true)).try_init()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("text", LogFormat::Text)]
    #[case("JSON", LogFormat::Json)]
    #[case(" json ", LogFormat::Json)]
    fn log_format_parses_case_insensitively(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>(), Ok(expected));
    }

    #[rstest]
    fn unknown_log_format_is_rejected() {
        assert_eq!(
            "pretty".parse::<LogFormat>(),
            Err(ParseLogFormatError("pretty".to_owned()))
        );
    }

    #[rstest]
    fn second_installation_reports_error_instead_of_panicking() {
        let _first = init_tracing(LogFormat::Json);

        let second = init_tracing(LogFormat::Text);

        assert!(matches!(second, Err(TelemetryError::Init(_))));
    }
}
