//! CLI-reference command handler

use crate::cli::ClirefArgs;
use crate::error::{Error, Result};
use crate::output;
use docsmith_core::cliref::{
    compile_reference, load_registry, ProcessRunner, ReferenceOptions,
};
use docsmith_core::RunReport;
use std::fs;
use tracing::{info, instrument};

/// Handle the cliref command
#[instrument(skip_all, fields(registry = %args.registry.display(), binary = %args.binary))]
pub async fn handle_cliref(args: ClirefArgs, use_color: bool) -> Result<RunReport> {
    if !args.registry.exists() {
        return Err(Error::FileNotFound {
            path: args.registry.clone(),
        });
    }
    let registry = load_registry(&args.registry)?;
    output::step(
        &format!(
            "Documenting {} command(s) from '{}'",
            registry.commands.len(),
            args.binary
        ),
        use_color,
    );

    let runner = ProcessRunner::new(&args.binary);
    // A missing tool is the unrecoverable setup failure of this driver.
    runner.probe()?;

    let existing = match fs::read_to_string(&args.out) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => return Err(err.into()),
    };

    let mut report = RunReport::new();
    let document = compile_reference(
        &registry,
        &runner,
        existing.as_deref(),
        ReferenceOptions {
            skip_tests: args.skip_tests,
        },
        &mut report,
    )?;
    fs::write(&args.out, document)?;
    info!(out = %args.out.display(), "reference document written");
    output::step(&format!("Wrote {}", args.out.display()), use_color);
    Ok(report)
}
