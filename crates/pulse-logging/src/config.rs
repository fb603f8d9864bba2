//! Logging configuration
//!
//! A [`LogConfig`] describes where log lines go (console, file or both) and
//! how JSONL lines are shaped. It is serde-serializable so it can be loaded
//! from a config file as well as built from command-line flags.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where and how to log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level used when RUST_LOG is unset
    pub default_level: String,
    pub console: ConsoleConfig,
    /// JSONL file output, off when `None`
    pub file: Option<FileConfig>,
    pub jsonl: JsonlConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            console: ConsoleConfig::default(),
            file: None,
            jsonl: JsonlConfig::default(),
        }
    }
}

impl LogConfig {
    /// Pretty, colored console output at debug level
    pub fn development() -> Self {
        Self {
            default_level: "debug".to_string(),
            console: ConsoleConfig {
                pretty: true,
                ansi: true,
                ..ConsoleConfig::default()
            },
            ..Default::default()
        }
    }

    /// Also write JSONL lines to the given files
    pub fn with_file(mut self, file: FileConfig) -> Self {
        self.file = Some(file);
        self
    }
}

/// Console output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Human-readable lines instead of JSONL
    pub pretty: bool,
    pub ansi: bool,
    /// Write to stderr, keeping stdout for command output
    #[serde(default)]
    pub stderr: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pretty: false,
            ansi: false,
            stderr: false,
        }
    }
}

/// JSONL file output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub directory: PathBuf,
    /// File name prefix; files are named `<prefix>.log` or
    /// `<prefix>.<date>.log` when rotating
    pub prefix: String,
    pub rotation: RotationStrategy,
    /// Rotated files to keep; ignored for [`RotationStrategy::Never`]
    pub max_files: Option<usize>,
}

impl FileConfig {
    /// Daily-rotated `pulse` logs in `directory`, keeping a week of files
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            prefix: "pulse".to_string(),
            rotation: RotationStrategy::Daily,
            max_files: Some(7),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_rotation(mut self, rotation: RotationStrategy) -> Self {
        self.rotation = rotation;
        self
    }
}

/// When to start a new log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationStrategy {
    #[default]
    Daily,
    Hourly,
    /// One file, truncated on startup
    Never,
}

impl fmt::Display for RotationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Hourly => write!(f, "hourly"),
            Self::Never => write!(f, "never"),
        }
    }
}

impl FromStr for RotationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "hourly" => Ok(Self::Hourly),
            "never" => Ok(Self::Never),
            other => Err(format!(
                "unknown rotation '{}' (expected daily, hourly or never)",
                other
            )),
        }
    }
}

/// Shape of JSONL lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonlConfig {
    /// Put event fields at the top level instead of under `fields`
    pub flatten_events: bool,
    pub include_spans: bool,
    pub include_current_span: bool,
    pub include_thread_info: bool,
    /// Source file and line
    pub include_location: bool,
}

impl Default for JsonlConfig {
    fn default() -> Self {
        Self {
            flatten_events: true,
            include_spans: true,
            include_current_span: true,
            include_thread_info: false,
            include_location: true,
        }
    }
}
