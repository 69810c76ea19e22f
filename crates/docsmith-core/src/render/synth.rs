//! Example synthesis
//!
//! When the schema carries no canonical example, concrete request bodies,
//! response JSON and wire-level calls are synthesized from the type tables.
//! The response priority chain is load-bearing: generated docs are diffed
//! against previous runs, so the fallback order must stay byte-stable.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

use crate::render::format::format_type;
use crate::schema::{BodySpec, Endpoint, Field, SchemaDocument};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// How one synthesis rule matches a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMatch {
    /// Display name equals the given string
    NameIs(&'static str),
    /// Display name contains the given substring
    NameContains(&'static str),
    /// Raw type descriptor equals the given string
    TypeIs(&'static str),
}

/// The representative value a rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representative {
    /// A runnable command string
    Command,
    /// A short human comment
    Comment,
    /// An argument list
    ArgList,
    /// A plausible port number
    Port,
    /// A slug derived from the field's wire name
    WireSlug,
}

/// Ordered heuristic rule table for request-body synthesis
///
/// First match wins; fields matching no rule are omitted from the
/// synthesized body.
pub const SYNTH_RULES: &[(RuleMatch, Representative)] = &[
    (RuleMatch::NameIs("cmd"), Representative::Command),
    (RuleMatch::NameIs("comment"), Representative::Comment),
    (RuleMatch::TypeIs("[]string"), Representative::ArgList),
    (RuleMatch::NameContains("port"), Representative::Port),
    (RuleMatch::TypeIs("string"), Representative::WireSlug),
];

impl RuleMatch {
    fn matches(self, field: &Field) -> bool {
        match self {
            RuleMatch::NameIs(name) => field.display_name() == name,
            RuleMatch::NameContains(fragment) => field.display_name().contains(fragment),
            RuleMatch::TypeIs(descriptor) => field.type_descriptor == descriptor,
        }
    }
}

impl Representative {
    fn value(self, field: &Field) -> Value {
        match self {
            Representative::Command => Value::String("echo hello".to_string()),
            Representative::Comment => Value::String("example comment".to_string()),
            Representative::ArgList => {
                Value::Array(vec!["arg1".into(), "arg2".into()])
            }
            Representative::Port => Value::Number(8080.into()),
            Representative::WireSlug => Value::String(slug(field.display_name())),
        }
    }
}

/// Slugified placeholder derived from a wire name
fn slug(wire_name: &str) -> String {
    wire_name.to_lowercase().replace('_', "-")
}

/// Representative value for one field, per the ordered rule table
pub fn representative_value(field: &Field) -> Option<Value> {
    SYNTH_RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(field))
        .map(|(_, rep)| rep.value(field))
}

/// Synthesize a request-body example for an endpoint
///
/// Priority: the referenced type's canonical example verbatim, then
/// field-by-field synthesis, then nothing.
pub fn synthesize_request(endpoint: &Endpoint, schema: &SchemaDocument) -> Option<String> {
    match endpoint.request.as_ref()? {
        BodySpec::Ref { reference } => {
            let def = schema.resolve_type(reference)?;
            if let Some(example) = &def.example {
                return Some(pretty(example));
            }
            synthesize_fields(&def.fields)
        }
        BodySpec::Inline { fields } => synthesize_fields(fields),
    }
}

fn synthesize_fields(fields: &[Field]) -> Option<String> {
    if fields.is_empty() {
        return None;
    }
    let mut body = Map::new();
    for field in fields {
        if let Some(value) = representative_value(field) {
            body.insert(field.display_name().to_string(), value);
        }
    }
    Some(pretty(&Value::Object(body)))
}

/// Synthesize a response-JSON example for an endpoint
///
/// Priority chain, reproduced exactly:
/// 1. the endpoint's own canonical example
/// 2. the example of the body type referenced by the first 200-status response
/// 3. the example of the type referenced by the generic response descriptor
/// 4. a placeholder object built from inline response fields
/// 5. empty string
pub fn synthesize_response(endpoint: &Endpoint, schema: &SchemaDocument) -> String {
    if let Some(example) = &endpoint.example {
        return pretty(example);
    }

    if let Some(example) = endpoint
        .responses
        .iter()
        .find(|r| r.status == 200)
        .and_then(|r| r.body.as_ref())
        .and_then(|body| body_example(body, schema))
    {
        return example;
    }

    match endpoint.response.as_ref() {
        Some(BodySpec::Ref { reference }) => schema
            .resolve_type(reference)
            .and_then(|def| def.example.as_ref())
            .map(pretty)
            .unwrap_or_default(),
        Some(BodySpec::Inline { fields }) => placeholder_object(fields),
        None => String::new(),
    }
}

fn body_example(body: &BodySpec, schema: &SchemaDocument) -> Option<String> {
    match body {
        BodySpec::Ref { reference } => schema
            .resolve_type(reference)
            .and_then(|def| def.example.as_ref())
            .map(pretty),
        BodySpec::Inline { .. } => None,
    }
}

/// Placeholder object where each value is the field's formatted type in
/// angle brackets
fn placeholder_object(fields: &[Field]) -> String {
    let mut body = Map::new();
    for field in fields {
        body.insert(
            field.display_name().to_string(),
            Value::String(format!("<{}>", format_type(&field.type_descriptor))),
        );
    }
    pretty(&Value::Object(body))
}

/// Synthesize the wire-level example: a `curl` call for HTTP endpoints, a
/// connect command for socket endpoints
pub fn synthesize_wire(endpoint: &Endpoint, schema: &SchemaDocument, api_base: &str) -> String {
    if endpoint.is_socket() {
        return synthesize_connect(&endpoint.path, api_base);
    }

    let url = format!("{}{}", api_base.trim_end_matches('/'), fill_path(&endpoint.path));
    let mut lines = Vec::new();
    if endpoint.method.eq_ignore_ascii_case("GET") {
        lines.push(format!("curl \"{url}\" \\"));
    } else {
        lines.push(format!("curl -X {} \"{url}\" \\", endpoint.method));
    }
    lines.push("  -H \"Authorization: Bearer $API_TOKEN\"".to_string());
    if let Some(body) = synthesize_request(endpoint, schema) {
        let last = lines.len() - 1;
        lines[last].push_str(" \\");
        lines.push(format!("  -d '{body}'"));
    }
    lines.join("\n")
}

/// Connection command for a socket endpoint - placeholder substitution
/// only, no body
pub fn synthesize_connect(path: &str, api_base: &str) -> String {
    let ws_base = api_base
        .trim_end_matches('/')
        .replacen("https://", "wss://", 1)
        .replacen("http://", "ws://", 1);
    format!("wscat -c \"{}{}\"", ws_base, fill_path(path))
}

/// Replace `{param}` placeholders with `<param>`
fn fill_path(path: &str) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap());
    placeholder.replace_all(path, "<$1>").into_owned()
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
