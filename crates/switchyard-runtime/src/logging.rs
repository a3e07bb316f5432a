//! Logging setup for Switchyard applications.
//!
//! Installs a `tracing-subscriber` registry driven by [`LoggingConfig`]. The
//! dispatcher opens one `dispatch` span per invocation, so the span event
//! settings control whether invocation boundaries show up in the log.
//!
//! ```rust,no_run
//! use switchyard_runtime::config::SpanEventConfig;
//! use switchyard_runtime::logging::LoggingBuilder;
//!
//! LoggingBuilder::new()
//!     .directive("switchyard_framework=debug")
//!     .span_events(SpanEventConfig::LIFECYCLE)
//!     .init();
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_appender::rolling;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, SpanEventConfig};

const DEFAULT_FILE_NAME: &str = "switchyard.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initializes logging from a [`LoggingConfig`].
///
/// Does nothing if a global subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// Builds and installs the global subscriber.
///
/// Starts from a [`LoggingConfig`]; the setters override single fields of it.
#[derive(Debug, Clone)]
pub struct LoggingBuilder {
    config: LoggingConfig,
    directives: Vec<String>,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self::from_config(&LoggingConfig::default())
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        // Sorted so the resulting filter does not depend on map order.
        let mut filters: Vec<_> = config.filters.iter().collect();
        filters.sort_by(|a, b| a.0.cmp(b.0));
        let directives = filters
            .into_iter()
            .map(|(target, level)| format!("{target}={level}"))
            .collect();

        Self {
            config: config.clone(),
            directives,
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Adds a filter directive such as `switchyard_framework=trace`.
    ///
    /// Directives that fail to parse are ignored when the filter is built.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    pub fn span_events(mut self, events: SpanEventConfig) -> Self {
        self.config.span_events = events;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.config.output = output;
        self
    }

    pub fn thread_ids(mut self, enabled: bool) -> Self {
        self.config.thread_ids = enabled;
        self
    }

    /// Include source file and line number in each record.
    pub fn file_location(mut self, enabled: bool) -> Self {
        self.config.file_location = enabled;
        self
    }

    /// Sets the log file and switches output to it.
    pub fn file(mut self, path: impl Into<PathBuf>, rotation: LogRotation) -> Self {
        self.config.output = LogOutput::File;
        self.config.file_path = Some(path.into());
        self.config.rotation = rotation;
        self
    }

    /// `RUST_LOG` wins over the configured level; directives are added on top.
    fn filter(&self) -> EnvFilter {
        let base = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.config.level.as_str()));
        self.directives
            .iter()
            .filter_map(|d| d.parse::<Directive>().ok())
            .fold(base, EnvFilter::add_directive)
    }

    fn writer(&self) -> BoxMakeWriter {
        match (&self.config.output, &self.config.file_path) {
            (LogOutput::Stdout, _) => BoxMakeWriter::new(std::io::stdout),
            (LogOutput::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
            (LogOutput::File, Some(path)) => {
                let dir = path.parent().unwrap_or_else(|| Path::new("."));
                let file = path
                    .file_name()
                    .unwrap_or_else(|| OsStr::new(DEFAULT_FILE_NAME));
                let appender = match self.config.rotation {
                    LogRotation::Never => rolling::never(dir, file),
                    LogRotation::Hourly => rolling::hourly(dir, file),
                    LogRotation::Daily => rolling::daily(dir, file),
                };
                BoxMakeWriter::new(appender)
            }
            (LogOutput::File, None) => {
                warn!("File output requested but no file path configured, using stdout");
                BoxMakeWriter::new(std::io::stdout)
            }
        }
    }

    fn layer(&self) -> BoxedLayer {
        let layer = fmt::layer()
            .with_writer(self.writer())
            .with_span_events(fmt_span(&self.config.span_events))
            .with_thread_ids(self.config.thread_ids)
            .with_file(self.config.file_location)
            .with_line_number(self.config.file_location);

        match self.config.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
            // Without the `json-log` feature json falls back to the full format.
            #[cfg(not(feature = "json-log"))]
            LogFormat::Json => layer.boxed(),
            LogFormat::Full => layer.boxed(),
        }
    }

    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Installs the subscriber, failing if one is already set.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.filter();
        tracing_subscriber::registry()
            .with(self.layer())
            .with(filter)
            .try_init()
    }
}

fn fmt_span(events: &SpanEventConfig) -> FmtSpan {
    [
        (events.new, FmtSpan::NEW),
        (events.enter, FmtSpan::ENTER),
        (events.exit, FmtSpan::EXIT),
        (events.close, FmtSpan::CLOSE),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .fold(FmtSpan::NONE, |acc, (_, span)| acc | span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_reads_config() {
        let mut config = LoggingConfig {
            level: LogLevel::Debug,
            thread_ids: true,
            span_events: SpanEventConfig::LIFECYCLE,
            ..Default::default()
        };
        config
            .filters
            .insert("switchyard_framework".into(), LogLevel::Trace);
        config.filters.insert("figment".into(), LogLevel::Warn);

        let builder = LoggingBuilder::from_config(&config).directive("tower=off");
        assert_eq!(builder.config, config);
        assert_eq!(
            builder.directives,
            vec!["figment=warn", "switchyard_framework=trace", "tower=off"]
        );
    }

    #[test]
    fn file_setter_switches_output() {
        let builder = LoggingBuilder::new().file("logs/app.log", LogRotation::Daily);
        assert_eq!(builder.config.output, LogOutput::File);
        assert_eq!(
            builder.config.file_path.as_deref(),
            Some(Path::new("logs/app.log"))
        );
        assert_eq!(builder.config.rotation, LogRotation::Daily);
    }

    #[test]
    fn span_event_flags_combine() {
        assert_eq!(fmt_span(&SpanEventConfig::FULL), FmtSpan::FULL);
        assert_eq!(fmt_span(&SpanEventConfig::ACTIVE), FmtSpan::ACTIVE);
        assert_eq!(fmt_span(&SpanEventConfig::NONE), FmtSpan::NONE);
        assert_eq!(
            fmt_span(&SpanEventConfig::LIFECYCLE),
            FmtSpan::NEW | FmtSpan::CLOSE
        );
    }
}
