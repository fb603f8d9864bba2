//! Command-line arguments for the `pulse` binary

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pulse_core::AttributeValue;
use pulse_logging::{FileConfig, LogConfig, PulseSubscriberBuilder, RotationStrategy};

use crate::parse_attribute;

/// Serialized form used on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Hex-encoded postcard bytes
    #[default]
    Postcard,
    /// JSON text
    Json,
}

/// Console log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON lines
    Json,
}

#[derive(Parser)]
#[command(name = "pulse", about = "Build, encode and inspect usage events")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Console log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Also write JSONL logs to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation (daily, hourly, never)
    #[arg(long, global = true, default_value_t = RotationStrategy::Daily)]
    pub log_rotation: RotationStrategy,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Logging configuration derived from the global flags
    pub fn log_config(&self) -> LogConfig {
        let mut config = match self.log_format {
            LogFormat::Pretty => LogConfig::development(),
            LogFormat::Json => LogConfig::default(),
        };
        config.default_level = self.log_level.clone();
        config.console.stderr = true;
        match &self.log_dir {
            Some(dir) => config.with_file(FileConfig::new(dir).with_rotation(self.log_rotation)),
            None => config,
        }
    }

    /// Subscriber builder for the global flags
    pub fn subscriber(&self) -> PulseSubscriberBuilder {
        PulseSubscriberBuilder::new().with_config(self.log_config())
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Build an event and print its serialized form
    Encode {
        /// Event key
        key: String,
        /// Number of occurrences
        #[arg(long)]
        count: Option<i64>,
        /// Duration in milliseconds
        #[arg(long)]
        duration: Option<i64>,
        /// Stamp the event with the current time
        #[arg(long)]
        timestamp: bool,
        /// Extra attribute as name=value (repeatable)
        #[arg(long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, AttributeValue)>,
        /// Mark the event transient (never serialized, so only logged)
        #[arg(long)]
        transient: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Postcard)]
        format: Format,
    },
    /// Decode a serialized event and print it
    Decode {
        /// Hex-encoded postcard bytes or JSON text
        input: String,
        /// Input format
        #[arg(long, value_enum, default_value_t = Format::Postcard)]
        format: Format,
    },
}
