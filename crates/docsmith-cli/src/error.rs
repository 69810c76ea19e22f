//! Error types and handling for the CLI

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the docsmith-core library
    #[error("{0}")]
    Core(#[from] docsmith_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parse error in the configuration file
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Process exit code for this error
    ///
    /// Setup failures (missing tool, bad config) exit with 2; everything
    /// else with 1. Degraded items never reach here - they live on the
    /// run report.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Toml(_) => 2,
            Error::Core(docsmith_core::Error::ToolMissing { .. }) => 2,
            Error::Core(docsmith_core::Error::Config { .. }) => 2,
            _ => 1,
        }
    }
}

/// Format an error for terminal display
pub fn format_error(error: &Error, use_color: bool) -> String {
    use colored::Colorize;
    if use_color {
        format!("{} {}", "error:".red().bold(), error)
    } else {
        format!("error: {error}")
    }
}
