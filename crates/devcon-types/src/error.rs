//! Error types for devcon.

use std::io;

/// Errors produced by the console.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("registration error: {0}")]
    Registration(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConsoleError>;
