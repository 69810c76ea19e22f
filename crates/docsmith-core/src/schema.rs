//! Data model for one fetched API schema version
//!
//! Everything in this module is deserialized from the upstream
//! `api_schema.json` / `{lang}-examples.json` documents and treated as
//! immutable for the duration of a run. The three definition tables
//! (types, enums, websocket messages) use [`IndexMap`] so that reference
//! pages enumerate entries in the order the schema declared them.
//!
//! Lookups into the tables return `Option`: a `$ref` that does not resolve
//! is a degraded condition, never a fatal one.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Root document for one API version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Version identifier (e.g. "v1")
    pub version: String,

    /// When the upstream generator produced this snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,

    /// All API operations, in display order
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    /// Named structured types, in declaration order
    #[serde(default)]
    pub types: IndexMap<String, TypeDef>,

    /// Named enumerations, in declaration order
    #[serde(default)]
    pub enums: IndexMap<String, EnumDef>,

    /// WebSocket message definitions - a namespace separate from `types`
    #[serde(default)]
    pub messages: IndexMap<String, MessageDef>,
}

impl SchemaDocument {
    /// Resolve a `$ref` (or bare name) in the type namespace
    pub fn resolve_type(&self, reference: &str) -> Option<&TypeDef> {
        self.types.get(ref_name(reference))
    }

    /// Resolve a `$ref` (or bare name) in the websocket message namespace
    pub fn resolve_message(&self, reference: &str) -> Option<&MessageDef> {
        self.messages.get(ref_name(reference))
    }

    /// Resolve a `$ref` (or bare name) in the enum namespace
    pub fn resolve_enum(&self, reference: &str) -> Option<&EnumDef> {
        self.enums.get(ref_name(reference))
    }
}

/// Strip the `#/types/` (or similar) prefix from a reference string
///
/// References take the form `#/types/SpriteList`; anything without a
/// slash is treated as an already-bare name.
pub fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Transport used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    /// Plain request/response over HTTP
    #[default]
    Http,
    /// Bidirectional message exchange over a socket
    Socket,
}

/// One API operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Display name (e.g. "List Sprites")
    pub name: String,

    /// Request path with `{param}` placeholders
    pub path: String,

    /// HTTP method, or the sentinel "SOCKET" for socket endpoints
    pub method: String,

    /// Transport kind
    #[serde(default)]
    pub protocol: Protocol,

    /// Grouping key for pages and sidebar
    pub category: String,

    /// Human description
    #[serde(default)]
    pub description: String,

    /// Query parameters
    #[serde(default)]
    pub query: Vec<Field>,

    /// Request body, as a reference or an inline field list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<BodySpec>,

    /// Declared responses
    #[serde(default)]
    pub responses: Vec<ResponseSpec>,

    /// Generic response body descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<BodySpec>,

    /// Streamed-response declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<StreamSpec>,

    /// Socket message declarations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<SocketSpec>,

    /// Canonical response example attached directly to the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl Endpoint {
    /// Exact-match key into an SDK example set: `"{METHOD} {path}"`
    pub fn example_key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    pub fn is_socket(&self) -> bool {
        self.protocol == Protocol::Socket
    }
}

/// A request or response body: either a reference into the type table or
/// an inline field list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodySpec {
    /// `{"$ref": "#/types/CreateSprite"}`
    Ref {
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// `{"fields": [...]}`
    Inline { fields: Vec<Field> },
}

/// One declared response: status plus optional body reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSpec {
    pub status: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodySpec>,

    #[serde(default)]
    pub description: String,
}

/// Streamed-response declaration: the message types the stream can carry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSpec {
    /// References into the type namespace
    #[serde(default)]
    pub message_types: Vec<String>,
}

/// Socket message declarations, split by direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketSpec {
    /// Client-to-server message references (websocket message namespace)
    #[serde(default)]
    pub send: Vec<String>,

    /// Server-to-client message references
    #[serde(default)]
    pub receive: Vec<String>,
}

/// One field of a type, message, query list or inline body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Internal name
    pub name: String,

    /// Wire name - preferred for display when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,

    /// Compact type descriptor (`string`, `*int`, `[]Sprite`, ...)
    #[serde(rename = "type")]
    pub type_descriptor: String,

    #[serde(default)]
    pub description: String,

    /// Whether the field may be omitted
    #[serde(default)]
    pub optional: bool,

    /// Constant value the field always carries, when declared
    #[serde(default, rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,
}

impl Field {
    /// Display name: wire name over internal name
    pub fn display_name(&self) -> &str {
        self.json.as_deref().unwrap_or(&self.name)
    }
}

/// Named structured type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDef {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub fields: Vec<Field>,

    /// Canonical example value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// Named enumeration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDef {
    #[serde(default)]
    pub description: String,

    /// Allowed literal values, in declaration order
    #[serde(default)]
    pub values: Vec<String>,
}

/// WebSocket message definition
///
/// Structurally identical to [`TypeDef`] but keyed in its own namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDef {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// Source languages the upstream publishes SDK examples for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Go,
    Js,
    Python,
    Elixir,
}

impl Lang {
    /// Fixed ordering used for example tabs and fetch fan-out
    pub const ALL: [Lang; 4] = [Lang::Go, Lang::Js, Lang::Python, Lang::Elixir];

    /// URL path segment (`{lang}-examples.json`)
    pub fn slug(self) -> &'static str {
        match self {
            Lang::Go => "go",
            Lang::Js => "js",
            Lang::Python => "python",
            Lang::Elixir => "elixir",
        }
    }

    /// Human tab label
    pub fn label(self) -> &'static str {
        match self {
            Lang::Go => "Go",
            Lang::Js => "JavaScript",
            Lang::Python => "Python",
            Lang::Elixir => "Elixir",
        }
    }

    /// Code-fence language tag
    pub fn fence(self) -> &'static str {
        match self {
            Lang::Go => "go",
            Lang::Js => "javascript",
            Lang::Python => "python",
            Lang::Elixir => "elixir",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Lang {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s {
            "go" => Ok(Lang::Go),
            "js" => Ok(Lang::Js),
            "python" => Ok(Lang::Python),
            "elixir" => Ok(Lang::Elixir),
            other => Err(crate::error::Error::config(format!(
                "unknown example language '{other}' (expected go, js, python or elixir)"
            ))),
        }
    }
}

/// One SDK example entry: a runnable snippet, its rendered output and an
/// equivalent command-line invocation - all optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdkExample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli: Option<String>,
}

/// Wire shape of a `{lang}-examples.json` document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdkExampleSet {
    #[serde(default)]
    pub endpoints: HashMap<String, SdkExample>,

    #[serde(default)]
    pub management: HashMap<String, SdkExample>,
}

/// Example set for one language
#[derive(Debug, Clone)]
pub struct LanguageExamples {
    pub lang: Lang,
    pub examples: SdkExampleSet,
}

impl LanguageExamples {
    pub fn new(lang: Lang, examples: SdkExampleSet) -> Self {
        Self { lang, examples }
    }

    /// Exact-match lookup by `"{METHOD} {path}"` key, `endpoints` first
    pub fn lookup(&self, key: &str) -> Option<&SdkExample> {
        self.examples
            .endpoints
            .get(key)
            .or_else(|| self.examples.management.get(key))
    }
}
