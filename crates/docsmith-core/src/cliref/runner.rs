//! Seam over the external CLI binary
//!
//! The reference compiler never cares how commands execute, only what text
//! they return; [`CommandRunner`] is that seam. [`ProcessRunner`] is the
//! production implementation, tests substitute their own.

use crate::error::{Error, Result};
use std::process::Command;
use tracing::debug;

/// Captured result of one command invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Supplies help text and runs test invocations
pub trait CommandRunner {
    /// Free-text help output for one command
    fn help(&self, command: &str) -> Result<String>;

    /// Run an arbitrary invocation of the binary
    fn run(&self, args: &[String]) -> Result<CommandOutput>;
}

/// Runs the real binary via the process API
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: String,
}

impl ProcessRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Verify the binary is present and executable
    ///
    /// A missing tool is the one unrecoverable setup failure of the
    /// cliref driver.
    pub fn probe(&self) -> Result<()> {
        self.invoke(&["--version".to_string()]).map(|_| ())
    }

    fn invoke(&self, args: &[String]) -> Result<CommandOutput> {
        debug!(binary = %self.binary, ?args, "invoking external tool");
        let output = Command::new(&self.binary).args(args).output().map_err(|source| {
            Error::ToolMissing {
                tool: self.binary.clone(),
                message: source.to_string(),
            }
        })?;
        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl CommandRunner for ProcessRunner {
    fn help(&self, command: &str) -> Result<String> {
        let output = self.invoke(&["help".to_string(), command.to_string()])?;
        Ok(output.stdout)
    }

    fn run(&self, args: &[String]) -> Result<CommandOutput> {
        self.invoke(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_tool_missing() {
        let runner = ProcessRunner::new("docsmith-no-such-binary");
        match runner.probe() {
            Err(Error::ToolMissing { tool, .. }) => {
                assert_eq!(tool, "docsmith-no-such-binary");
            }
            other => panic!("expected ToolMissing, got {other:?}"),
        }
    }
}
