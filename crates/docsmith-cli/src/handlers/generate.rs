//! Site generation command handler

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use docsmith_core::{generate_site, RunReport};
use tracing::{info, instrument};

/// Handle the generate command
#[instrument(skip_all)]
pub async fn handle_generate(
    args: GenerateArgs,
    config: Config,
    use_color: bool,
) -> Result<RunReport> {
    let site = config.into_site_config(&args)?;
    info!(
        versions = ?site.versions,
        output = %site.output_root.display(),
        "starting site generation"
    );
    output::step(
        &format!(
            "Generating {} version(s) into {}",
            site.versions.len(),
            site.output_root.display()
        ),
        use_color,
    );

    let mut report = RunReport::new();
    generate_site(&site, &mut report).await?;

    output::step("Generation complete", use_color);
    Ok(report)
}
