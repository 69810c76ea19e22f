//! Full-page assembly for one schema version
//!
//! Folds per-endpoint section bundles into category pages and builds the
//! index, type-reference and redirect documents. Assemblers enumerate
//! every entry of the tables they are given - no sampling, no omissions -
//! and preserve source declaration order.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

use crate::document::{Block, CalloutKind, Page};
use crate::render::properties::build_properties;
use crate::render::sections::{anchor_id, endpoint_sections};
use crate::render::{title_case, RenderContext};
use crate::report::RunReport;
use crate::schema::{Endpoint, Field, SchemaDocument};

/// Assemble one category page
///
/// Endpoint bundles appear in the given order, separated by a rule; a
/// callout about socket transport is prepended when any endpoint in the
/// category uses it.
pub fn assemble_category_page(
    category: &str,
    endpoints: &[&Endpoint],
    ctx: &RenderContext<'_>,
    report: &mut RunReport,
) -> Page {
    let mut page = Page::new(title_case(category));
    if endpoints.iter().any(|endpoint| endpoint.is_socket()) {
        page.push(Block::Callout {
            kind: CalloutKind::Note,
            text: "Some operations on this page use a bidirectional socket \
                   connection instead of a single request and response."
                .to_string(),
        });
    }
    for (index, endpoint) in endpoints.iter().enumerate() {
        if index > 0 {
            page.push(Block::Rule);
        }
        page.extend(endpoint_sections(endpoint, ctx, report));
    }
    page
}

/// Assemble the version overview page
pub fn assemble_index_page(
    schema: &SchemaDocument,
    categories: &[(&str, usize)],
) -> Page {
    let mut page = Page::new("API Reference");
    let mut intro = format!("API version `{}`.", schema.version);
    if let Some(generated_at) = schema.generated_at {
        intro.push_str(&format!(
            " Schema snapshot from {}.",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    page.push(Block::Paragraph(intro));
    page.push(Block::Table {
        headers: vec!["Section".to_string(), "Operations".to_string()],
        rows: categories
            .iter()
            .map(|(category, count)| {
                vec![
                    format!("[{}]({}.md)", title_case(category), category),
                    count.to_string(),
                ]
            })
            .collect(),
    });
    page.push(Block::Paragraph(
        "See [Type Definitions](types.md) for every request and response shape."
            .to_string(),
    ));
    page
}

/// Assemble the type/enum/message reference page
///
/// Every entry of the three tables appears, in source declaration order.
pub fn assemble_types_page(ctx: &RenderContext<'_>) -> Page {
    let schema = ctx.schema;
    let mut page = Page::new("Type Definitions");

    if !schema.types.is_empty() {
        page.push(section_heading(2, "Types"));
        for (name, def) in &schema.types {
            page.push(section_heading(3, name));
            if !def.description.is_empty() {
                page.push(Block::Paragraph(def.description.clone()));
            }
            page.extend(field_blocks(&def.fields, schema, def.example.as_ref()));
        }
    }

    if !schema.enums.is_empty() {
        page.push(section_heading(2, "Enums"));
        for (name, def) in &schema.enums {
            page.push(section_heading(3, name));
            if !def.description.is_empty() {
                page.push(Block::Paragraph(def.description.clone()));
            }
            page.push(Block::Table {
                headers: vec!["Value".to_string()],
                rows: def.values.iter().map(|v| vec![format!("`{v}`")]).collect(),
            });
        }
    }

    if !schema.messages.is_empty() {
        page.push(section_heading(2, "WebSocket Messages"));
        for (name, def) in &schema.messages {
            page.push(section_heading(3, name));
            if !def.description.is_empty() {
                page.push(Block::Paragraph(def.description.clone()));
            }
            page.extend(field_blocks(&def.fields, schema, def.example.as_ref()));
        }
    }

    page
}

fn section_heading(level: u8, text: &str) -> Block {
    Block::Heading {
        level,
        text: text.to_string(),
        anchor: Some(anchor_id(text)),
    }
}

fn field_blocks(
    fields: &[Field],
    schema: &SchemaDocument,
    example: Option<&serde_json::Value>,
) -> Vec<Block> {
    let mut blocks = Vec::new();
    if !fields.is_empty() {
        let nodes = build_properties(fields, schema, 0);
        let mut rows = Vec::new();
        for node in &nodes {
            rows.push(vec![
                format!("`{}`", node.name),
                node.type_display.clone(),
                if node.required { "yes" } else { "no" }.to_string(),
                node.description.clone(),
            ]);
        }
        blocks.push(Block::Table {
            headers: vec![
                "Name".to_string(),
                "Type".to_string(),
                "Required".to_string(),
                "Description".to_string(),
            ],
            rows,
        });
    }
    if let Some(example) = example {
        blocks.push(Block::Code {
            lang: Some("json".to_string()),
            text: serde_json::to_string_pretty(example).unwrap_or_default(),
        });
    }
    blocks
}

/// Build the root redirect document declaring the default version canonical
pub fn redirect_page(default_version: &str) -> Page {
    let mut page = Page::new("API Documentation");
    page.push(Block::Html(format!(
        "<meta http-equiv=\"refresh\" content=\"0; url=./{default_version}/\">"
    )));
    page.push(Block::Paragraph(format!(
        "The current API reference lives at [{default_version}](./{default_version}/)."
    )));
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> SchemaDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_category_page_separates_endpoints_with_rules() {
        let doc = schema(json!({
            "version": "v1",
            "endpoints": [
                {"name": "One", "method": "GET", "path": "/v1/one", "category": "sprites"},
                {"name": "Two", "method": "GET", "path": "/v1/two", "category": "sprites"},
                {"name": "Three", "method": "GET", "path": "/v1/three", "category": "sprites"}
            ]
        }));
        let ctx = RenderContext {
            schema: &doc,
            examples: &[],
            api_base: "https://api.example.com",
        };
        let mut report = RunReport::new();
        let endpoints: Vec<&Endpoint> = doc.endpoints.iter().collect();
        let page = assemble_category_page("sprites", &endpoints, &ctx, &mut report);
        let rules = page.blocks.iter().filter(|b| matches!(b, Block::Rule)).count();
        assert_eq!(rules, 2);
        assert!(!page.blocks.iter().any(|b| matches!(b, Block::Callout { .. })));
    }

    #[test]
    fn test_category_page_socket_callout() {
        let doc = schema(json!({
            "version": "v1",
            "endpoints": [
                {"name": "Attach", "method": "SOCKET", "path": "/v1/attach",
                 "protocol": "socket", "category": "sprites"}
            ]
        }));
        let ctx = RenderContext {
            schema: &doc,
            examples: &[],
            api_base: "https://api.example.com",
        };
        let mut report = RunReport::new();
        let endpoints: Vec<&Endpoint> = doc.endpoints.iter().collect();
        let page = assemble_category_page("sprites", &endpoints, &ctx, &mut report);
        assert!(matches!(page.blocks[0], Block::Callout { .. }));
    }

    #[test]
    fn test_types_page_enumerates_everything_in_source_order() {
        let doc = schema(json!({
            "version": "v1",
            "types": {
                "Zeta": {"fields": []},
                "Alpha": {"fields": [{"name": "N", "json": "n", "type": "int"}]}
            },
            "enums": {
                "State": {"values": ["running", "stopped"]}
            },
            "messages": {
                "Resize": {"fields": [{"name": "Cols", "json": "cols", "type": "int"}]}
            }
        }));
        let ctx = RenderContext {
            schema: &doc,
            examples: &[],
            api_base: "https://api.example.com",
        };
        let page = assemble_types_page(&ctx);
        let headings: Vec<&str> = page
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level: 3, text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        // Source order preserved: Zeta before Alpha.
        assert_eq!(headings, vec!["Zeta", "Alpha", "State", "Resize"]);
    }

    #[test]
    fn test_redirect_points_at_default_version() {
        let page = redirect_page("v1");
        let md = page.to_markdown();
        assert!(md.contains("url=./v1/"));
        assert!(md.contains("[v1](./v1/)"));
    }
}
