//! Per-endpoint section fragments
//!
//! Each builder here is a total function over its inputs: a missing piece
//! renders as an absent fragment, never a failed build. Lookup misses are
//! recorded on the run report and the fragment is simply omitted.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

use crate::document::{Block, ExampleTab};
use crate::render::properties::{build_properties, PropertyNode};
use crate::render::synth::{synthesize_response, synthesize_wire};
use crate::render::RenderContext;
use crate::report::{DegradeCode, RunReport};
use crate::schema::{BodySpec, Endpoint, Field, Lang, MessageDef, TypeDef};
use serde_json::Value;

/// Anchor id for an endpoint display name
///
/// Lowercase, non-alphanumeric runs collapse to single hyphens, leading
/// and trailing hyphens trimmed. The sidebar builds its link fragments
/// with this same function, which is what keeps the two byte-identical.
pub fn anchor_id(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// Method header fragment: anchored heading, `METHOD /path` line,
/// description paragraph
pub fn method_header(endpoint: &Endpoint) -> Vec<Block> {
    let mut blocks = vec![
        Block::Heading {
            level: 2,
            text: endpoint.name.clone(),
            anchor: Some(anchor_id(&endpoint.name)),
        },
        Block::Code {
            lang: Some("http".to_string()),
            text: format!("{} {}", endpoint.method, endpoint.path),
        },
    ];
    if !endpoint.description.is_empty() {
        blocks.push(Block::Paragraph(endpoint.description.clone()));
    }
    blocks
}

/// Flatten a property tree into table rows, indenting nested names
fn property_rows(nodes: &[PropertyNode], depth: usize, rows: &mut Vec<Vec<String>>) {
    for node in nodes {
        let indent = "&nbsp;&nbsp;".repeat(depth);
        rows.push(vec![
            format!("{indent}`{}`", node.name),
            node.type_display.clone(),
            if node.required { "yes" } else { "no" }.to_string(),
            node.description.clone(),
        ]);
        property_rows(&node.children, depth + 1, rows);
    }
}

fn properties_table(nodes: &[PropertyNode]) -> Block {
    let mut rows = Vec::new();
    property_rows(nodes, 0, &mut rows);
    Block::Table {
        headers: vec![
            "Name".to_string(),
            "Type".to_string(),
            "Required".to_string(),
            "Description".to_string(),
        ],
        rows,
    }
}

/// Query-parameter fragment, only when the endpoint declares any
pub fn query_properties(endpoint: &Endpoint, ctx: &RenderContext<'_>) -> Vec<Block> {
    if endpoint.query.is_empty() {
        return Vec::new();
    }
    let nodes = build_properties(&endpoint.query, ctx.schema, 0);
    vec![
        Block::Heading {
            level: 3,
            text: "Query parameters".to_string(),
            anchor: None,
        },
        properties_table(&nodes),
    ]
}

/// Request-body property fragment
///
/// An unresolvable request reference degrades to no fragment at all;
/// sibling sections still render.
pub fn request_properties(
    endpoint: &Endpoint,
    ctx: &RenderContext<'_>,
    report: &mut RunReport,
) -> Vec<Block> {
    let fields: &[Field] = match endpoint.request.as_ref() {
        None => return Vec::new(),
        Some(BodySpec::Inline { fields }) => fields,
        Some(BodySpec::Ref { reference }) => match ctx.schema.resolve_type(reference) {
            Some(def) => &def.fields,
            None => {
                report.record(
                    DegradeCode::UnresolvedType,
                    format!("{} page", endpoint.category),
                    &endpoint.name,
                    format!("request body references unknown type '{reference}'"),
                );
                return Vec::new();
            }
        },
    };
    if fields.is_empty() {
        return Vec::new();
    }
    let nodes = build_properties(fields, ctx.schema, 0);
    vec![
        Block::Heading {
            level: 3,
            text: "Request body".to_string(),
            anchor: None,
        },
        properties_table(&nodes),
    ]
}

fn status_indicator(status: u16) -> &'static str {
    match status {
        200..=299 => "🟢",
        300..=399 => "🔵",
        400..=499 => "🟠",
        _ => "🔴",
    }
}

/// Response-status table, omitted when no responses are declared
pub fn response_status_table(endpoint: &Endpoint) -> Vec<Block> {
    if endpoint.responses.is_empty() {
        return Vec::new();
    }
    let rows = endpoint
        .responses
        .iter()
        .map(|response| {
            let body = match response.body.as_ref() {
                Some(BodySpec::Ref { reference }) => {
                    let name = crate::schema::ref_name(reference);
                    format!("[{name}](types.md#{})", anchor_id(name))
                }
                Some(BodySpec::Inline { .. }) => "inline object".to_string(),
                None => String::new(),
            };
            vec![
                format!("{} `{}`", status_indicator(response.status), response.status),
                body,
                response.description.clone(),
            ]
        })
        .collect();
    vec![
        Block::Heading {
            level: 3,
            text: "Responses".to_string(),
            anchor: None,
        },
        Block::Table {
            headers: vec![
                "Status".to_string(),
                "Body".to_string(),
                "Description".to_string(),
            ],
            rows,
        },
    ]
}

/// Response example fragment, when the synthesis chain produces anything
pub fn response_example(endpoint: &Endpoint, ctx: &RenderContext<'_>) -> Vec<Block> {
    let example = synthesize_response(endpoint, ctx.schema);
    if example.is_empty() {
        return Vec::new();
    }
    vec![
        Block::Heading {
            level: 3,
            text: "Response".to_string(),
            anchor: None,
        },
        Block::Code {
            lang: Some("json".to_string()),
            text: example,
        },
    ]
}

/// Field table for a message or event type, annotating constant values
fn message_field_table(fields: &[Field]) -> Block {
    let rows = fields
        .iter()
        .map(|field| {
            let mut type_display = crate::render::format::format_type(&field.type_descriptor);
            if let Some(constant) = &field.const_value {
                type_display.push_str(&format!(" (always `{}`)", constant_literal(constant)));
            }
            vec![
                format!("`{}`", field.display_name()),
                type_display,
                field.description.clone(),
            ]
        })
        .collect();
    Block::Table {
        headers: vec![
            "Field".to_string(),
            "Type".to_string(),
            "Description".to_string(),
        ],
        rows,
    }
}

fn constant_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn message_blocks(name: &str, def: &MessageDef) -> Vec<Block> {
    let mut blocks = vec![Block::Heading {
        level: 4,
        text: name.to_string(),
        anchor: None,
    }];
    if !def.description.is_empty() {
        blocks.push(Block::Paragraph(def.description.clone()));
    }
    if !def.fields.is_empty() {
        blocks.push(message_field_table(&def.fields));
    }
    if let Some(example) = &def.example {
        blocks.push(Block::Code {
            lang: Some("json".to_string()),
            text: serde_json::to_string_pretty(example).unwrap_or_default(),
        });
    }
    blocks
}

/// Socket message fragment: client-to-server then server-to-client
/// sections, each independently optional
pub fn socket_messages(
    endpoint: &Endpoint,
    ctx: &RenderContext<'_>,
    report: &mut RunReport,
) -> Vec<Block> {
    let Some(socket) = endpoint.socket.as_ref() else {
        return Vec::new();
    };
    let mut blocks = Vec::new();
    for (title, refs) in [
        ("Client → server messages", &socket.send),
        ("Server → client messages", &socket.receive),
    ] {
        let mut section = Vec::new();
        for reference in refs {
            match ctx.schema.resolve_message(reference) {
                Some(def) => {
                    section.extend(message_blocks(crate::schema::ref_name(reference), def));
                }
                None => report.record(
                    DegradeCode::UnresolvedMessage,
                    format!("{} page", endpoint.category),
                    &endpoint.name,
                    format!("socket message references unknown message '{reference}'"),
                ),
            }
        }
        if !section.is_empty() {
            blocks.push(Block::Heading {
                level: 3,
                text: title.to_string(),
                anchor: None,
            });
            blocks.append(&mut section);
        }
    }
    blocks
}

/// Event-type tag for a streaming event: the constant on a field named
/// `type` when declared, else a slug of the type's own name
fn event_tag(name: &str, def: &TypeDef) -> String {
    def.fields
        .iter()
        .find(|field| field.display_name() == "type")
        .and_then(|field| field.const_value.as_ref())
        .map(constant_literal)
        .unwrap_or_else(|| anchor_id(name))
}

/// Streaming-event fragment for declared stream message types
pub fn stream_events(
    endpoint: &Endpoint,
    ctx: &RenderContext<'_>,
    report: &mut RunReport,
) -> Vec<Block> {
    let Some(stream) = endpoint.stream.as_ref() else {
        return Vec::new();
    };
    let mut blocks = Vec::new();
    for reference in &stream.message_types {
        let Some(def) = ctx.schema.resolve_type(reference) else {
            report.record(
                DegradeCode::UnresolvedType,
                format!("{} page", endpoint.category),
                &endpoint.name,
                format!("stream declares unknown message type '{reference}'"),
            );
            continue;
        };
        blocks.push(Block::Heading {
            level: 4,
            text: format!("`{}`", event_tag(crate::schema::ref_name(reference), def)),
            anchor: None,
        });
        if !def.description.is_empty() {
            blocks.push(Block::Paragraph(def.description.clone()));
        }
        if !def.fields.is_empty() {
            blocks.push(message_field_table(&def.fields));
        }
        if let Some(example) = &def.example {
            blocks.push(Block::Code {
                lang: Some("json".to_string()),
                text: serde_json::to_string_pretty(example).unwrap_or_default(),
            });
        }
    }
    if blocks.is_empty() {
        return Vec::new();
    }
    let mut section = vec![Block::Heading {
        level: 3,
        text: "Stream events".to_string(),
        anchor: None,
    }];
    section.append(&mut blocks);
    section
}

/// Example tabs in fixed order: CLI first, then one tab per language with
/// a snippet, then the generated wire example as the guaranteed fallback
///
/// A language without a snippet is absent, not empty.
pub fn example_tabs(endpoint: &Endpoint, ctx: &RenderContext<'_>) -> Block {
    let key = endpoint.example_key();
    let mut tabs = Vec::new();

    let by_lang = |lang: Lang| {
        ctx.examples
            .iter()
            .find(|set| set.lang == lang)
            .and_then(|set| set.lookup(&key))
    };

    if let Some(cli) = Lang::ALL
        .iter()
        .filter_map(|&lang| by_lang(lang))
        .find_map(|example| example.cli.clone())
    {
        tabs.push(ExampleTab {
            label: "CLI".to_string(),
            lang: "bash".to_string(),
            code: cli,
        });
    }

    for lang in Lang::ALL {
        if let Some(code) = by_lang(lang).and_then(|example| example.code.clone()) {
            tabs.push(ExampleTab {
                label: lang.label().to_string(),
                lang: lang.fence().to_string(),
                code,
            });
        }
    }

    tabs.push(ExampleTab {
        label: if endpoint.is_socket() { "Connect" } else { "curl" }.to_string(),
        lang: "bash".to_string(),
        code: synthesize_wire(endpoint, ctx.schema, ctx.api_base),
    });

    Block::Tabs(tabs)
}

/// Full section bundle for one endpoint, in page order
pub fn endpoint_sections(
    endpoint: &Endpoint,
    ctx: &RenderContext<'_>,
    report: &mut RunReport,
) -> Vec<Block> {
    let mut blocks = method_header(endpoint);
    blocks.extend(query_properties(endpoint, ctx));
    blocks.extend(request_properties(endpoint, ctx, report));
    blocks.extend(response_status_table(endpoint));
    if endpoint.is_socket() {
        blocks.extend(socket_messages(endpoint, ctx, report));
    } else {
        blocks.extend(response_example(endpoint, ctx));
    }
    blocks.extend(stream_events(endpoint, ctx, report));
    blocks.push(example_tabs(endpoint, ctx));
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LanguageExamples, SchemaDocument, SdkExample, SdkExampleSet};
    use serde_json::json;

    fn schema(value: serde_json::Value) -> SchemaDocument {
        serde_json::from_value(value).unwrap()
    }

    fn examples_with(lang: Lang, key: &str, code: Option<&str>, cli: Option<&str>) -> LanguageExamples {
        let mut set = SdkExampleSet::default();
        set.endpoints.insert(
            key.to_string(),
            SdkExample {
                code: code.map(str::to_string),
                output: None,
                cli: cli.map(str::to_string),
            },
        );
        LanguageExamples::new(lang, set)
    }

    #[test]
    fn test_anchor_id_collapses_non_alphanumerics() {
        assert_eq!(anchor_id("List Sprites"), "list-sprites");
        assert_eq!(anchor_id("Exec (stream)"), "exec-stream");
        assert_eq!(anchor_id("  Weird --- Name!  "), "weird-name");
        assert_eq!(anchor_id("Get Sprite's URL"), "get-sprite-s-url");
    }

    #[test]
    fn test_example_tab_ordering_invariant() {
        // go and js supply snippets, js also supplies a cli command,
        // python and elixir supply nothing: expect [CLI, Go, JavaScript,
        // curl] - python is absent, not empty.
        let doc = schema(json!({
            "version": "v1",
            "endpoints": [{
                "name": "List Sprites", "method": "GET", "path": "/v1/sprites",
                "category": "sprites"
            }]
        }));
        let sets = vec![
            examples_with(Lang::Go, "GET /v1/sprites", Some("client.List(ctx)"), None),
            examples_with(Lang::Js, "GET /v1/sprites", Some("await client.list()"), Some("sprite list")),
        ];
        let ctx = RenderContext {
            schema: &doc,
            examples: &sets,
            api_base: "https://api.example.com",
        };
        let Block::Tabs(tabs) = example_tabs(&doc.endpoints[0], &ctx) else {
            panic!("expected tabs block");
        };
        let labels: Vec<&str> = tabs.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["CLI", "Go", "JavaScript", "curl"]);
    }

    #[test]
    fn test_cli_tab_takes_first_language_in_fixed_order() {
        let doc = schema(json!({
            "version": "v1",
            "endpoints": [{
                "name": "List Sprites", "method": "GET", "path": "/v1/sprites",
                "category": "sprites"
            }]
        }));
        // Both go and elixir supply a cli command; go wins the fixed order.
        let sets = vec![
            examples_with(Lang::Elixir, "GET /v1/sprites", None, Some("from-elixir")),
            examples_with(Lang::Go, "GET /v1/sprites", None, Some("from-go")),
        ];
        let ctx = RenderContext {
            schema: &doc,
            examples: &sets,
            api_base: "https://api.example.com",
        };
        let Block::Tabs(tabs) = example_tabs(&doc.endpoints[0], &ctx) else {
            panic!("expected tabs block");
        };
        assert_eq!(tabs[0].code, "from-go");
    }

    #[test]
    fn test_response_table_indicators_and_omission() {
        let doc = schema(json!({
            "version": "v1",
            "endpoints": [
                {
                    "name": "Create", "method": "POST", "path": "/v1/sprites",
                    "category": "sprites",
                    "responses": [
                        {"status": 201, "description": "created"},
                        {"status": 302, "description": "moved"},
                        {"status": 404, "description": "missing"},
                        {"status": 500, "description": "boom"}
                    ]
                },
                {
                    "name": "Bare", "method": "GET", "path": "/v1/bare",
                    "category": "sprites"
                }
            ]
        }));
        let blocks = response_status_table(&doc.endpoints[0]);
        let Block::Table { rows, .. } = &blocks[1] else {
            panic!("expected table");
        };
        assert!(rows[0][0].starts_with("🟢"));
        assert!(rows[1][0].starts_with("🔵"));
        assert!(rows[2][0].starts_with("🟠"));
        assert!(rows[3][0].starts_with("🔴"));

        assert!(response_status_table(&doc.endpoints[1]).is_empty());
    }

    #[test]
    fn test_request_ref_miss_degrades_without_error() {
        let doc = schema(json!({
            "version": "v1",
            "endpoints": [{
                "name": "Create Sprite", "method": "POST", "path": "/v1/sprites",
                "category": "sprites",
                "request": {"$ref": "#/types/NoSuchType"}
            }]
        }));
        let ctx = RenderContext {
            schema: &doc,
            examples: &[],
            api_base: "https://api.example.com",
        };
        let mut report = RunReport::new();
        let blocks = request_properties(&doc.endpoints[0], &ctx, &mut report);
        assert!(blocks.is_empty());
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_stream_event_tag_prefers_type_constant() {
        let doc = schema(json!({
            "version": "v1",
            "endpoints": [{
                "name": "Watch", "method": "GET", "path": "/v1/watch",
                "category": "sprites",
                "stream": {"message_types": ["#/types/StateChange", "#/types/LogLine"]}
            }],
            "types": {
                "StateChange": {
                    "fields": [
                        {"name": "Type", "json": "type", "type": "string", "const": "state_change"}
                    ]
                },
                "LogLine": {
                    "fields": [{"name": "Line", "json": "line", "type": "string"}]
                }
            }
        }));
        let ctx = RenderContext {
            schema: &doc,
            examples: &[],
            api_base: "https://api.example.com",
        };
        let mut report = RunReport::new();
        let blocks = stream_events(&doc.endpoints[0], &ctx, &mut report);
        let tags: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level: 4, text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(tags, vec!["`state_change`", "`logline`"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_socket_sections_independently_optional() {
        let doc = schema(json!({
            "version": "v1",
            "endpoints": [{
                "name": "Attach", "method": "SOCKET", "path": "/v1/attach",
                "protocol": "socket",
                "category": "sprites",
                "socket": {"send": [], "receive": ["#/messages/Output"]}
            }],
            "messages": {
                "Output": {
                    "fields": [
                        {"name": "Data", "json": "data", "type": "string", "const": "out"}
                    ]
                }
            }
        }));
        let ctx = RenderContext {
            schema: &doc,
            examples: &[],
            api_base: "https://api.example.com",
        };
        let mut report = RunReport::new();
        let blocks = socket_messages(&doc.endpoints[0], &ctx, &mut report);
        let titles: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level: 3, text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["Server → client messages"]);
        // Constant annotation shows up in the field table.
        let Some(Block::Table { rows, .. }) = blocks.iter().find(|b| matches!(b, Block::Table { .. }))
        else {
            panic!("expected field table");
        };
        assert!(rows[0][1].contains("always"));
    }
}
