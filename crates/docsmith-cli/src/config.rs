//! Configuration management for the CLI
//!
//! Configuration merges, lowest precedence first: built-in defaults, the
//! TOML config file, command-line arguments.

use crate::cli::GenerateArgs;
use crate::error::{Error, Result};
use docsmith_core::{Lang, ManualPage, SiteConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteSection,
}

/// `[site]` section of the config file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Schema versions to generate, in order
    pub versions: Vec<String>,

    /// Version the root redirect points at; defaults to the first version
    pub default_version: Option<String>,

    pub schema_base_url: String,

    pub api_base_url: String,

    pub output_root: PathBuf,

    /// Directory of hand-authored pages copied into every version
    pub manual_dir: Option<PathBuf>,

    /// Languages to fetch example sets for
    pub languages: Vec<String>,

    /// Manual pages declared for the sidebar
    pub manual_pages: Vec<ManualPage>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            versions: vec!["v1".to_string()],
            default_version: None,
            schema_base_url: "https://schemas.example.com/api".to_string(),
            api_base_url: "https://api.example.com".to_string(),
            output_root: PathBuf::from("docs/api"),
            manual_dir: None,
            languages: vec![
                "go".to_string(),
                "js".to_string(),
                "python".to_string(),
                "elixir".to_string(),
            ],
            manual_pages: Vec::new(),
        }
    }
}

impl Config {
    /// Load the config file when a path is given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                if !path.exists() {
                    return Err(Error::FileNotFound {
                        path: path.to_path_buf(),
                    });
                }
                let text = fs::read_to_string(path)?;
                Ok(toml::from_str(&text)?)
            }
        }
    }

    /// Fold CLI overrides in and produce the driver configuration
    pub fn into_site_config(self, args: &GenerateArgs) -> Result<SiteConfig> {
        let site = self.site;
        let versions = if args.versions.is_empty() {
            site.versions
        } else {
            args.versions.clone()
        };
        let default_version = site
            .default_version
            .or_else(|| versions.first().cloned())
            .ok_or_else(|| Error::config("no schema versions configured"))?;
        let languages = site
            .languages
            .iter()
            .map(|lang| lang.parse::<Lang>())
            .collect::<docsmith_core::Result<Vec<_>>>()?;
        Ok(SiteConfig {
            versions,
            default_version,
            schema_base_url: args
                .base_url
                .clone()
                .unwrap_or(site.schema_base_url),
            api_base_url: args
                .api_base_url
                .clone()
                .unwrap_or(site.api_base_url),
            output_root: args.output.clone().unwrap_or(site.output_root),
            manual_dir: args.manual_dir.clone().or(site.manual_dir),
            languages,
            manual_pages: site.manual_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["generate"];
        full.extend_from_slice(argv);
        GenerateArgs::parse_from(full)
    }

    #[test]
    fn test_defaults_produce_a_valid_site_config() {
        let config = Config::default();
        let site = config.into_site_config(&generate_args(&[])).unwrap();
        assert_eq!(site.versions, vec!["v1"]);
        assert_eq!(site.default_version, "v1");
        assert_eq!(site.languages.len(), 4);
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let config: Config = toml::from_str(
            r#"
            [site]
            versions = ["v1", "v2"]
            default_version = "v2"
            output_root = "from-file"
            "#,
        )
        .unwrap();
        let args = generate_args(&["--output", "from-cli", "--schema-version", "v3"]);
        let site = config.into_site_config(&args).unwrap();
        assert_eq!(site.versions, vec!["v3"]);
        // The file's default_version survives even when versions are
        // overridden; the driver validates the combination.
        assert_eq!(site.default_version, "v2");
        assert_eq!(site.output_root, PathBuf::from("from-cli"));
    }

    #[test]
    fn test_manual_pages_parse_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [site]
            versions = ["v1"]

            [[site.manual_pages]]
            title = "Quickstart"
            slug = "quickstart"

            [[site.manual_pages.ops]]
            name = "First Boot"
            method = "POST"
            "#,
        )
        .unwrap();
        assert_eq!(config.site.manual_pages.len(), 1);
        assert_eq!(config.site.manual_pages[0].ops[0].method, "POST");
    }

    #[test]
    fn test_bad_language_is_a_config_error() {
        let config: Config = toml::from_str(
            r#"
            [site]
            versions = ["v1"]
            languages = ["go", "cobol"]
            "#,
        )
        .unwrap();
        assert!(config.into_site_config(&generate_args(&[])).is_err());
    }
}
