//! Reference-document assembly and regeneration
//!
//! The generated region of the reference document sits between literal
//! start/end markers. Regeneration replaces only that region; whatever a
//! human wrote after the end marker is carried over byte-for-byte.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

use crate::cliref::help::{parse_help, ParsedHelp};
use crate::cliref::registry::{CommandRegistry, CommandSpec};
use crate::cliref::runner::CommandRunner;
use crate::document::{Block, Page};
use crate::error::Result;
use crate::render::sections::anchor_id;
use crate::render::title_case;
use crate::report::{DegradeCode, RunReport};
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const GENERATED_START: &str = "<!-- docsmith:generated:start -->";
pub const GENERATED_END: &str = "<!-- docsmith:generated:end -->";

/// One command together with its parsed help
#[derive(Debug, Clone)]
pub struct CommandDoc {
    pub spec: CommandSpec,
    pub help: ParsedHelp,
}

/// Options for one reference compilation run
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceOptions {
    /// Bypass auth/ephemeral-resource setup and per-command tests
    pub skip_tests: bool,
}

/// Compile the full reference document
///
/// Fetches help text for every registered command, runs the optional test
/// harness, and merges the generated region into `existing` when a
/// previous document is supplied. Per-command failures degrade; only
/// harness setup failures propagate.
pub fn compile_reference(
    registry: &CommandRegistry,
    runner: &dyn CommandRunner,
    existing: Option<&str>,
    options: ReferenceOptions,
    report: &mut RunReport,
) -> Result<String> {
    let mut docs = Vec::new();
    for spec in &registry.commands {
        let text = match runner.help(&spec.name) {
            Ok(text) => text,
            Err(err) => {
                report.record(
                    DegradeCode::HelpParse,
                    "cliref",
                    &spec.name,
                    format!("failed to fetch help output: {err}"),
                );
                continue;
            }
        };
        match parse_help(&text) {
            Ok(help) => docs.push(CommandDoc {
                spec: spec.clone(),
                help,
            }),
            Err(err) => {
                report.record(DegradeCode::HelpParse, "cliref", &spec.name, err.to_string());
            }
        }
    }

    if options.skip_tests {
        info!("skipping command tests and harness setup");
    } else {
        run_tests(registry, runner, report)?;
    }

    let body = generated_body(&docs);
    Ok(merge_generated(existing, &body, &registry.title))
}

/// Run the ephemeral harness and every command's test invocation
///
/// Per-command failures are recorded, never fatal; harness setup failures
/// are the unrecoverable kind and propagate.
fn run_tests(
    registry: &CommandRegistry,
    runner: &dyn CommandRunner,
    report: &mut RunReport,
) -> Result<()> {
    if let Some(harness) = &registry.harness {
        check_orphans(harness, runner);
        for setup in &harness.setup {
            let output = runner.run(setup)?;
            if !output.success() {
                return Err(crate::error::Error::config(format!(
                    "harness setup command {:?} failed: {}",
                    setup,
                    output.stderr.trim()
                )));
            }
        }
    }

    for spec in &registry.commands {
        let Some(test) = &spec.test else { continue };
        match runner.run(&test.args) {
            Ok(output) if output.success() => {}
            Ok(output) => report.record(
                DegradeCode::CommandTest,
                "cliref",
                &spec.name,
                format!("exit status {}: {}", output.status, output.stderr.trim()),
            ),
            Err(err) => report.record(
                DegradeCode::CommandTest,
                "cliref",
                &spec.name,
                err.to_string(),
            ),
        }
    }

    if let Some(harness) = &registry.harness {
        for teardown in &harness.teardown {
            match runner.run(teardown) {
                Ok(output) if output.success() => {}
                Ok(output) => warn!(?teardown, status = output.status, "teardown failed"),
                Err(err) => warn!(?teardown, %err, "teardown failed"),
            }
        }
    }
    Ok(())
}

/// Advisory check for ephemeral resources left over from an aborted run
fn check_orphans(harness: &crate::cliref::registry::HarnessSpec, runner: &dyn CommandRunner) {
    let (Some(list), Some(prefix)) = (&harness.list, &harness.orphan_prefix) else {
        return;
    };
    match runner.run(list) {
        Ok(output) => {
            for line in output.stdout.lines() {
                if line.trim_start().starts_with(prefix.as_str()) {
                    warn!(resource = line.trim(), "orphaned ephemeral resource from a previous run");
                }
            }
        }
        Err(err) => warn!(%err, "orphan check failed"),
    }
}

/// Render the generated region: commands grouped by category
fn generated_body(docs: &[CommandDoc]) -> String {
    let mut by_category: BTreeMap<&str, Vec<&CommandDoc>> = BTreeMap::new();
    for doc in docs {
        by_category
            .entry(doc.spec.category.as_str())
            .or_default()
            .push(doc);
    }

    let mut blocks = Vec::new();
    for (category, docs) in &by_category {
        blocks.push(Block::Heading {
            level: 2,
            text: title_case(category),
            anchor: Some(anchor_id(category)),
        });
        for doc in docs {
            blocks.extend(command_blocks(doc));
        }
    }
    emit_blocks(&blocks)
}

fn command_blocks(doc: &CommandDoc) -> Vec<Block> {
    let spec = &doc.spec;
    let help = &doc.help;
    let mut blocks = vec![Block::Heading {
        level: 3,
        text: spec.name.clone(),
        anchor: Some(anchor_id(&spec.name)),
    }];
    if !spec.aliases.is_empty() {
        let aliases = spec
            .aliases
            .iter()
            .map(|a| format!("`{a}`"))
            .collect::<Vec<_>>()
            .join(", ");
        blocks.push(Block::Paragraph(format!("Aliases: {aliases}")));
    }
    if spec.needs_auth {
        blocks.push(Block::Paragraph(
            "*Requires an authenticated session.*".to_string(),
        ));
    }
    if !help.description.is_empty() {
        blocks.push(Block::Paragraph(help.description.clone()));
    }
    if !help.usage.is_empty() {
        blocks.push(Block::Code {
            lang: Some("bash".to_string()),
            text: help.usage.clone(),
        });
    }
    if !help.options.is_empty() {
        blocks.push(Block::Table {
            headers: vec!["Option".to_string(), "Description".to_string()],
            rows: help
                .options
                .iter()
                .map(|opt| vec![format!("`{}`", opt.flags), opt.description.clone()])
                .collect(),
        });
    }
    for note in &help.notes {
        blocks.push(Block::Paragraph(format!("Note: {note}")));
    }
    if !help.examples.is_empty() {
        blocks.push(Block::Code {
            lang: Some("bash".to_string()),
            text: help.examples.join("\n"),
        });
    }
    blocks
}

/// Emit a block list without a page title
fn emit_blocks(blocks: &[Block]) -> String {
    let page = Page {
        title: String::new(),
        blocks: blocks.to_vec(),
    };
    let markdown = page.to_markdown();
    // Drop the empty level-1 heading the page serializer emits.
    markdown.strip_prefix("# \n").unwrap_or(&markdown).to_string()
}

/// Merge a freshly generated region into an existing document
///
/// When `existing` carries both markers, only the region between them is
/// replaced; text before the start marker and after the end marker is
/// preserved byte-for-byte. Otherwise a fresh document is produced.
pub fn merge_generated(existing: Option<&str>, body: &str, title: &str) -> String {
    if let Some(existing) = existing {
        if let (Some(start), Some(end)) = (existing.find(GENERATED_START), existing.find(GENERATED_END))
        {
            if start < end {
                let prefix = &existing[..start];
                let suffix = &existing[end + GENERATED_END.len()..];
                return format!("{prefix}{GENERATED_START}\n{body}{GENERATED_END}{suffix}");
            }
        }
    }
    format!("# {title}\n\n{GENERATED_START}\n{body}{GENERATED_END}\n")
}

/// Extract the hand-written trailing section of a reference document
pub fn manual_section(document: &str) -> Option<&str> {
    document
        .find(GENERATED_END)
        .map(|end| &document[end + GENERATED_END.len()..])
}
