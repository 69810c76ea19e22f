//! Docsmith Core - schema-to-documentation compiler
//!
//! This crate turns a versioned, machine-readable API schema (endpoints,
//! types, enums, websocket messages) plus per-SDK example sets into a
//! cross-referenced documentation corpus: category pages, a type
//! reference, a synchronized sidebar and a CLI command reference.
//!
//! # Main Components
//!
//! - **Schema model**: serde structures for the fetched schema documents
//! - **Render stages**: pure transformation functions, leaves first -
//!   type formatting, example synthesis, property trees, section
//!   fragments, page assembly, sidebar
//! - **Generation driver**: sequential per-version fetch/compile/write
//! - **Degradation report**: per-item problems recorded, never fatal
//! - **CLI reference**: help-text state-machine parser and marker-delimited
//!   document regeneration

pub mod cliref;
pub mod document;
pub mod error;
pub mod fetch;
pub mod generate;
pub mod render;
pub mod report;
pub mod schema;

// Re-export main types for convenience
pub use document::{Block, CalloutKind, ExampleTab, Page};
pub use error::{Error, Result};
pub use fetch::SchemaClient;
pub use generate::{
    compile_version, generate_site, generate_version, CompiledVersion, OutputPage, SiteConfig,
};
pub use render::sidebar::{ManualOp, ManualPage, SidebarEntry, SidebarGroup, SidebarLink};
pub use render::RenderContext;
pub use report::{DegradeCode, DegradedItem, RunReport};
pub use schema::{
    Endpoint, EnumDef, Field, Lang, LanguageExamples, MessageDef, Protocol, SchemaDocument,
    SdkExample, SdkExampleSet, TypeDef,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }
}
