//! Command registry for the CLI-reference compiler
//!
//! The registry is a JSON document maintained next to the docs: which
//! commands exist, how they group, and how to exercise them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The full command registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRegistry {
    /// Document title for a freshly created reference page
    #[serde(default = "default_title")]
    pub title: String,

    pub commands: Vec<CommandSpec>,

    /// Optional ephemeral test harness around command test invocations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harness: Option<HarnessSpec>,
}

fn default_title() -> String {
    "CLI Reference".to_string()
}

/// One registered command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,

    /// Grouping key within the reference document
    pub category: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    /// Whether the command needs an active authenticated session
    #[serde(default)]
    pub needs_auth: bool,

    /// Arguments for a smoke-test invocation, when the command has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<TestInvocation>,
}

/// A smoke-test invocation for one command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestInvocation {
    pub args: Vec<String>,
}

/// Ephemeral-resource setup and teardown around the test pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessSpec {
    /// Commands run before any test invocation
    #[serde(default)]
    pub setup: Vec<Vec<String>>,

    /// Commands run after the test pass, best-effort
    #[serde(default)]
    pub teardown: Vec<Vec<String>>,

    /// Command listing live resources, used for the orphan check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,

    /// Name prefix identifying ephemeral resources from previous runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphan_prefix: Option<String>,
}

/// Load a registry from a JSON file
pub fn load_registry(path: &Path) -> Result<CommandRegistry> {
    let text = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
    serde_json::from_str(&text).map_err(|source| Error::Json {
        context: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_parses_minimal_and_full_entries() {
        let registry: CommandRegistry = serde_json::from_str(
            r#"{
                "commands": [
                    {"name": "list", "category": "sprites"},
                    {
                        "name": "exec",
                        "category": "sprites",
                        "aliases": ["run"],
                        "needs_auth": true,
                        "test": {"args": ["exec", "--", "true"]}
                    }
                ],
                "harness": {
                    "setup": [["create", "docsmith-test"]],
                    "teardown": [["destroy", "docsmith-test"]],
                    "orphan_prefix": "docsmith-test"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(registry.title, "CLI Reference");
        assert_eq!(registry.commands.len(), 2);
        assert!(registry.commands[1].needs_auth);
        assert_eq!(
            registry.harness.unwrap().orphan_prefix.as_deref(),
            Some("docsmith-test")
        );
    }
}
