//! Command-line interface argument parsing and definitions
//!
//! Defined with clap's derive API; global flags mirror across both
//! subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Docsmith - schema-driven API documentation generator
///
/// Fetches a versioned API schema plus per-SDK example sets and renders
/// the documentation corpus: category pages, type reference, sidebar and
/// CLI command reference.
#[derive(Parser, Debug)]
#[command(
    name = "docsmith",
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "DOCSMITH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the versioned API reference site
    Generate(GenerateArgs),

    /// Generate the CLI command reference from the external binary
    Cliref(ClirefArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Output root directory (overrides the config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Schema versions to generate (overrides the config file, repeatable)
    #[arg(long = "schema-version")]
    pub versions: Vec<String>,

    /// Base URL the schema documents are fetched from
    #[arg(long)]
    pub base_url: Option<String>,

    /// Base URL of the live API, used in synthesized wire calls
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Directory of hand-authored pages copied into every version
    #[arg(long)]
    pub manual_dir: Option<PathBuf>,
}

/// Arguments for the cliref command
#[derive(Parser, Debug)]
pub struct ClirefArgs {
    /// Path to the command registry JSON file
    #[arg(value_name = "REGISTRY")]
    pub registry: PathBuf,

    /// The CLI binary to document
    #[arg(short, long, default_value = "sprite")]
    pub binary: String,

    /// Output path of the reference document
    #[arg(short, long, default_value = "reference.md")]
    pub out: PathBuf,

    /// Skip auth/ephemeral-resource setup and per-command tests
    #[arg(long, env = "DOCSMITH_SKIP_TESTS")]
    pub skip_tests: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }

    /// Effective verbosity, folding in the documented env switch
    pub fn verbosity_level(&self) -> u8 {
        if std::env::var_os("DOCSMITH_VERBOSE").is_some() {
            self.verbose.max(1)
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "docsmith",
            "generate",
            "--output",
            "out",
            "--schema-version",
            "v1",
            "--schema-version",
            "v2",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.versions, vec!["v1", "v2"]);
        assert_eq!(args.output.unwrap(), PathBuf::from("out"));
    }

    #[test]
    fn test_cli_parses_cliref_defaults() {
        let cli = Cli::try_parse_from(["docsmith", "cliref", "commands.json"]).unwrap();
        let Commands::Cliref(args) = cli.command else {
            panic!("expected cliref");
        };
        assert_eq!(args.binary, "sprite");
        assert_eq!(args.out, PathBuf::from("reference.md"));
        assert!(!args.skip_tests);
    }
}
