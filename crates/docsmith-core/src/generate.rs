//! Per-version generation driver
//!
//! Versions are processed sequentially: fetch (concurrent inside), compile
//! (pure), then clean-and-write the version's output directory and copy the
//! shared manual pages in. The root redirect document is written only after
//! every configured version succeeded. Writes made before a mid-version
//! failure are not rolled back.

use crate::document::Page;
use crate::error::{Error, Result};
use crate::fetch::SchemaClient;
use crate::render::pages::{
    assemble_category_page, assemble_index_page, assemble_types_page, redirect_page,
};
use crate::render::sidebar::{build_sidebar, emit_sidebar, ManualPage, SidebarEntry};
use crate::render::{group_by_category, RenderContext};
use crate::report::RunReport;
use crate::schema::{Lang, LanguageExamples, SchemaDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything the driver needs for one run
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Schema versions to generate, in order
    pub versions: Vec<String>,
    /// Version the root redirect points at
    pub default_version: String,
    /// Base URL the schema documents are fetched from
    pub schema_base_url: String,
    /// Base URL of the live API, used in synthesized wire calls
    pub api_base_url: String,
    /// Root of the generated file tree
    pub output_root: PathBuf,
    /// Directory of hand-authored pages copied into every version
    pub manual_dir: Option<PathBuf>,
    /// Languages to fetch example sets for
    pub languages: Vec<Lang>,
    /// Manual pages declared for the sidebar
    pub manual_pages: Vec<ManualPage>,
}

impl SiteConfig {
    /// Validate cross-field invariants
    pub fn validate(&self) -> Result<()> {
        if self.versions.is_empty() {
            return Err(Error::config("no schema versions configured"));
        }
        if !self.versions.contains(&self.default_version) {
            return Err(Error::config(format!(
                "default version '{}' is not among the configured versions",
                self.default_version
            )));
        }
        Ok(())
    }
}

/// One compiled output file
#[derive(Debug)]
pub struct OutputPage {
    /// File name inside the version directory
    pub file_name: String,
    pub page: Page,
}

/// The pure compilation result for one version
#[derive(Debug)]
pub struct CompiledVersion {
    pub pages: Vec<OutputPage>,
    pub sidebar: Vec<SidebarEntry>,
}

/// Compile one fetched version into pages and a sidebar
///
/// Pure over its inputs; the page assemblers and the sidebar consume the
/// same category grouping, which keeps their anchors consistent.
pub fn compile_version(
    schema: &SchemaDocument,
    examples: &[LanguageExamples],
    config: &SiteConfig,
    report: &mut RunReport,
) -> CompiledVersion {
    let ctx = RenderContext {
        schema,
        examples,
        api_base: &config.api_base_url,
    };
    let groups: Vec<(&str, Vec<&crate::schema::Endpoint>)> =
        group_by_category(schema).into_iter().collect();

    let mut pages = Vec::new();

    let counts: Vec<(&str, usize)> = groups
        .iter()
        .map(|(category, endpoints)| (*category, endpoints.len()))
        .collect();
    pages.push(OutputPage {
        file_name: "index.md".to_string(),
        page: assemble_index_page(schema, &counts),
    });

    for (category, endpoints) in &groups {
        pages.push(OutputPage {
            file_name: format!("{category}.md"),
            page: assemble_category_page(category, endpoints, &ctx, report),
        });
    }

    pages.push(OutputPage {
        file_name: "types.md".to_string(),
        page: assemble_types_page(&ctx),
    });

    let sidebar = build_sidebar(&config.manual_pages, &groups);

    CompiledVersion { pages, sidebar }
}

/// Generate every configured version, then the root redirect
pub async fn generate_site(config: &SiteConfig, report: &mut RunReport) -> Result<()> {
    config.validate()?;
    for version in &config.versions {
        generate_version(config, version, report).await?;
    }
    let redirect = redirect_page(&config.default_version);
    write_page(&config.output_root, "index.md", &redirect)?;
    info!(
        root = %config.output_root.display(),
        versions = config.versions.len(),
        "generation complete"
    );
    Ok(())
}

/// Fetch, compile and write one version
pub async fn generate_version(
    config: &SiteConfig,
    version: &str,
    report: &mut RunReport,
) -> Result<()> {
    info!(version, "generating version");
    let client = SchemaClient::for_version(&config.schema_base_url, version)?;
    let (schema, examples) = client.fetch_version_inputs(&config.languages).await?;

    let compiled = compile_version(&schema, &examples, config, report);

    let version_dir = config.output_root.join(version);
    clean_dir(&version_dir)?;
    for output in &compiled.pages {
        write_page(&version_dir, &output.file_name, &output.page)?;
    }
    let sidebar_path = version_dir.join("_sidebar-config");
    fs::write(&sidebar_path, emit_sidebar(&compiled.sidebar))
        .map_err(|source| Error::io(&sidebar_path, source))?;

    if let Some(manual_dir) = &config.manual_dir {
        copy_manual_pages(manual_dir, &version_dir)?;
    }
    info!(version, pages = compiled.pages.len(), "version written");
    Ok(())
}

/// Clear and recreate a generation root
fn clean_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|source| Error::io(dir, source))?;
    }
    fs::create_dir_all(dir).map_err(|source| Error::io(dir, source))
}

fn write_page(dir: &Path, file_name: &str, page: &Page) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::io(dir, source))?;
    let path = dir.join(file_name);
    fs::write(&path, page.to_markdown()).map_err(|source| Error::io(&path, source))
}

/// Copy the shared hand-authored pages into a version directory
///
/// Only regular `.md` files are copied; the manual source is never
/// mutated.
fn copy_manual_pages(manual_dir: &Path, version_dir: &Path) -> Result<()> {
    let entries = fs::read_dir(manual_dir).map_err(|source| Error::io(manual_dir, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| Error::io(manual_dir, source))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        if let Some(file_name) = path.file_name() {
            let dest = version_dir.join(file_name);
            fs::copy(&path, &dest).map_err(|source| Error::io(&dest, source))?;
        }
    }
    Ok(())
}
