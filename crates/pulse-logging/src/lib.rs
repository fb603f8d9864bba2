//! JSONL logging setup for Pulse
//!
//! Library crates in the workspace only emit `tracing` events; binaries and
//! tests install a subscriber through [`PulseSubscriberBuilder`].
//!
//! # Features
//!
//! - **JSONL Output**: Structured JSON lines format for log aggregation (default)
//! - **Pretty Console**: Human-readable output for development
//! - **File Rotation**: Daily/hourly log rotation via tracing-appender
//!
//! # Quick Start
//!
//! ```ignore
//! use pulse_logging::{LogConfig, PulseSubscriberBuilder};
//!
//! // Simple setup with defaults (JSONL to console)
//! PulseSubscriberBuilder::new().init();
//!
//! // Development mode with pretty human-readable output
//! PulseSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .init();
//! ```

pub mod config;

pub use config::{ConsoleConfig, FileConfig, JsonlConfig, LogConfig, RotationStrategy};

use std::fs::{self, File};

use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{
    self,
    format::{Format, Json, JsonFields},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;
type JsonLayer<W> = fmt::Layer<Registry, JsonFields, Format<Json>, W>;

/// Errors that can occur while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file: {0}")]
    FileOutput(String),

    #[error("Global subscriber already set: {0}")]
    AlreadyInitialized(String),
}

/// Builder for configuring and initializing the Pulse logging subscriber
///
/// By default, console output uses JSONL format. Use `LogConfig::development()`
/// for human-readable pretty output during development.
pub struct PulseSubscriberBuilder {
    config: LogConfig,
}

impl PulseSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    ///
    /// Default: JSONL output to console
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
        }
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Switch console output between pretty and JSONL
    pub fn with_pretty_console(mut self, pretty: bool) -> Self {
        self.config.console.pretty = pretty;
        self
    }

    /// Configure file output
    pub fn with_file_output(mut self, config: FileConfig) -> Self {
        self.config.file = Some(config);
        self
    }

    /// Get the configuration the builder will apply
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Initialize the subscriber globally
    ///
    /// Returns the file writer guard, if file output is enabled; it must be
    /// kept alive for the duration of the program.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber has already been set or the log file
    /// cannot be opened.
    pub fn init(self) -> Option<WorkerGuard> {
        match self.try_init() {
            Ok(guard) => guard,
            Err(e) => panic!("Failed to initialize logging: {}", e),
        }
    }

    /// Try to initialize the subscriber globally
    pub fn try_init(self) -> Result<Option<WorkerGuard>, LoggingError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.config.default_level));

        let mut layers: Vec<BoxedLayer> = Vec::new();
        let mut guard = None;

        if self.config.console.enabled {
            layers.push(self.console_layer());
        }

        if let Some(file_config) = &self.config.file {
            let (writer, file_guard) = create_file_writer(file_config)?;
            layers.push(self.json_layer(writer));
            guard = Some(file_guard);
        }

        Registry::default()
            .with(layers)
            .with(env_filter)
            .try_init()
            .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

        tracing::debug!(
            default_level = %self.config.default_level,
            console = self.config.console.enabled,
            file = self.config.file.is_some(),
            "Logging initialized"
        );

        Ok(guard)
    }

    fn console_layer(&self) -> BoxedLayer {
        let console = &self.config.console;
        let layer = tracing_subscriber::fmt::layer();
        match (console.pretty, console.stderr) {
            (true, false) => layer.with_ansi(console.ansi).with_target(true).boxed(),
            (true, true) => layer
                .with_ansi(console.ansi)
                .with_target(true)
                .with_writer(std::io::stderr)
                .boxed(),
            (false, false) => self.jsonl_format(layer.json()).boxed(),
            (false, true) => self
                .jsonl_format(layer.json())
                .with_writer(std::io::stderr)
                .boxed(),
        }
    }

    fn json_layer(&self, writer: NonBlocking) -> BoxedLayer {
        self.jsonl_format(tracing_subscriber::fmt::layer().json())
            .with_writer(writer)
            .boxed()
    }

    fn jsonl_format<W>(&self, layer: JsonLayer<W>) -> JsonLayer<W> {
        let jsonl = &self.config.jsonl;
        layer
            .with_current_span(jsonl.include_current_span)
            .with_span_list(jsonl.include_spans)
            .flatten_event(jsonl.flatten_events)
            .with_thread_ids(jsonl.include_thread_info)
            .with_file(jsonl.include_location)
            .with_line_number(jsonl.include_location)
    }
}

impl Default for PulseSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the file writer; truncates for `Never` rotation, appends for others
fn create_file_writer(config: &FileConfig) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    fs::create_dir_all(&config.directory).map_err(|e| LoggingError::FileOutput(e.to_string()))?;

    let rotation = match config.rotation {
        RotationStrategy::Never => {
            let path = config.directory.join(format!("{}.log", config.prefix));
            let file = File::create(&path).map_err(|e| LoggingError::FileOutput(e.to_string()))?;
            return Ok(tracing_appender::non_blocking(file));
        }
        RotationStrategy::Daily => Rotation::DAILY,
        RotationStrategy::Hourly => Rotation::HOURLY,
    };

    let mut builder = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(&config.prefix)
        .filename_suffix("log");
    if let Some(max_files) = config.max_files {
        builder = builder.max_log_files(max_files);
    }
    let appender = builder
        .build(&config.directory)
        .map_err(|e| LoggingError::FileOutput(e.to_string()))?;

    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creation() {
        let builder = PulseSubscriberBuilder::new();
        assert_eq!(builder.config().default_level, "info");
    }

    #[test]
    fn test_default_is_jsonl() {
        let builder = PulseSubscriberBuilder::new();
        assert!(!builder.config().console.pretty);
    }

    #[test]
    fn test_builder_with_config() {
        let builder = PulseSubscriberBuilder::new().with_config(LogConfig::development());
        assert_eq!(builder.config().default_level, "debug");
        assert!(builder.config().console.pretty);
    }

    #[test]
    fn test_builder_overrides() {
        let builder = PulseSubscriberBuilder::new()
            .with_level("trace")
            .with_console(false)
            .with_pretty_console(true)
            .with_file_output(FileConfig::new("./logs"));
        assert_eq!(builder.config().default_level, "trace");
        assert!(!builder.config().console.enabled);
        assert!(builder.config().console.pretty);
        assert!(builder.config().file.is_some());
    }

    #[test]
    fn test_logging_error_display() {
        let err = LoggingError::FileOutput("permission denied".to_string());
        assert!(format!("{}", err).contains("permission denied"));
    }
}
