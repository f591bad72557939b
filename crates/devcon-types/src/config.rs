//! Console configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::{ConsoleError, Result};

/// Default scrollback capacity.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Line shown whenever the scrollback would otherwise be empty.
pub const DEFAULT_LINE: &str = "Type 'help' to see all commands.";

/// How the scrollback sheds lines once it is over capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Remove at most one line from the head per maintenance tick.
    #[default]
    Frame,
    /// Remove every surplus line in a single maintenance tick.
    Drain,
}

/// On-disk format written by the file exporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// One console line per text line.
    #[default]
    Plain,
    /// One JSON object per line: `{"index":N,"line":"..."}`.
    JsonLines,
}

impl ExportFormat {
    /// File extension appended to export targets that have none.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Plain => "txt",
            Self::JsonLines => "jsonl",
        }
    }
}

/// Settings for the `save_logs` file exporter (`[export]` table).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory export files are written into.
    pub directory: PathBuf,
    /// File name used when `save_logs` is given no argument. Its extension
    /// is replaced by the one matching `format`.
    pub default_file_name: String,
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            default_file_name: "console_logs.txt".to_string(),
            format: ExportFormat::Plain,
        }
    }
}

/// Top-level console configuration (`console.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Maximum scrollback length after a maintenance tick.
    pub history_capacity: usize,
    /// Line reinserted when the scrollback is empty at maintenance time.
    pub default_line: String,
    /// Prefix prepended to echoed input lines.
    pub echo_prefix: String,
    pub eviction: EvictionPolicy,
    /// Append `Unknown command: <name>` when nothing matches.
    pub report_unknown_commands: bool,
    /// Minimum level captured from the `log` facade (`"off"` .. `"trace"`).
    pub capture_level: String,
    pub export: ExportConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_line: DEFAULT_LINE.to_string(),
            echo_prefix: "> ".to_string(),
            eviction: EvictionPolicy::Frame,
            report_unknown_commands: false,
            capture_level: "info".to_string(),
            export: ExportConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a configuration from TOML source.
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&source)?;
        log::debug!("Loaded console config from {}", path.display());
        Ok(config)
    }

    /// Check the invariants the console relies on.
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(ConsoleError::Config(
                "history_capacity must be greater than zero".to_string(),
            ));
        }
        if self.default_line.is_empty() {
            return Err(ConsoleError::Config(
                "default_line must not be empty".to_string(),
            ));
        }
        if self.export.default_file_name.trim().is_empty() {
            return Err(ConsoleError::Config(
                "export.default_file_name must not be empty".to_string(),
            ));
        }
        self.capture_level_filter()?;
        Ok(())
    }

    /// The parsed `capture_level`.
    pub fn capture_level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.capture_level).map_err(|_| {
            ConsoleError::Config(format!("unknown capture_level: {}", self.capture_level))
        })
    }
}
