//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchyardConfig {
    /// Logging setup.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Which controllers are registered on start.
    #[serde(default)]
    pub controllers: ControllersConfig,

    /// Dispatcher behavior.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
///
/// `Json` needs the `json-log` feature; without it the full format is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// When a file appender starts a new file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Span lifecycle events to log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanEventConfig {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    pub close: bool,
}

impl SpanEventConfig {
    pub const NONE: Self = Self {
        new: false,
        enter: false,
        exit: false,
        close: false,
    };

    /// Creation and close only; one line at each end of a dispatch.
    pub const LIFECYCLE: Self = Self {
        new: true,
        enter: false,
        exit: false,
        close: true,
    };

    pub const ACTIVE: Self = Self {
        new: false,
        enter: true,
        exit: true,
        close: false,
    };

    pub const FULL: Self = Self {
        new: true,
        enter: true,
        exit: true,
        close: true,
    };
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level, overridden by `RUST_LOG` when set.
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Required when `output` is `file`.
    pub file_path: Option<PathBuf>,
    pub rotation: LogRotation,
    pub thread_ids: bool,
    /// Include source file and line.
    pub file_location: bool,
    /// Per-target levels, e.g. `switchyard_framework = "debug"`.
    pub filters: HashMap<String, LogLevel>,
    pub span_events: SpanEventConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            file_path: None,
            rotation: LogRotation::Never,
            thread_ids: false,
            file_location: false,
            filters: HashMap::new(),
            span_events: SpanEventConfig::default(),
        }
    }
}

// =============================================================================
// Controllers and dispatch
// =============================================================================

/// Controller selection.
///
/// An empty `enabled` list enables every controller in the manifest;
/// `disabled` is applied afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllersConfig {
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
}

impl ControllersConfig {
    /// Returns `true` if the controller named `name` should be registered.
    pub fn is_enabled(&self, name: &str) -> bool {
        let listed = self.enabled.is_empty() || self.enabled.iter().any(|n| n == name);
        listed && !self.disabled.iter().any(|n| n == name)
    }
}

/// Dispatcher options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// List the candidate overloads in binding and missing-parameter failures.
    pub explain_failures: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_enabled_list_means_all() {
        let config = ControllersConfig {
            enabled: vec![],
            disabled: vec!["admin".into()],
        };
        assert!(config.is_enabled("users"));
        assert!(!config.is_enabled("admin"));
    }

    #[test]
    fn enabled_list_restricts() {
        let config = ControllersConfig {
            enabled: vec!["users".into()],
            disabled: vec![],
        };
        assert!(config.is_enabled("users"));
        assert!(!config.is_enabled("greeter"));
    }

    #[test]
    fn levels_deserialize_lowercase() {
        let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
        assert_eq!(level.to_tracing_level(), tracing::Level::WARN);
    }
}
