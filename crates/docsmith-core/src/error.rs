//! Error types for the Docsmith core library
//!
//! Fatal failures live here; per-item degradations (an unresolved `$ref`,
//! a missing SDK snippet) are never errors - they are recorded on the
//! [`crate::report::RunReport`] and generation continues.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Docsmith operations
#[derive(Error, Debug)]
pub enum Error {
    /// Schema or example fetch failed
    #[error("Fetch failed for {url}: {message}")]
    Http {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Malformed top-level JSON in a fetched document
    #[error("JSON error in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// File system failures while writing the output tree
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid base URL or join failure
    #[error("Invalid URL {input}: {source}")]
    Url {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// Configuration errors (missing versions, bad language tag, ...)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Required external tool is absent or not executable
    #[error("Required tool '{tool}' is missing or not executable: {message}")]
    ToolMissing { tool: String, message: String },

    /// Help text for one command could not be parsed
    ///
    /// Callers downgrade this to a per-command degraded item; it only
    /// surfaces as an `Error` at the parse boundary itself.
    #[error("Help text parse failed: {message}")]
    HelpParse { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wrap an IO error with the path it occurred at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;
