//! The schema-to-documentation compiler
//!
//! Pure transformation stages, leaves first: type formatting, example
//! synthesis, property trees, per-endpoint section fragments, full page
//! assembly and the synchronized sidebar. Every stage receives the full
//! [`SchemaDocument`] context explicitly - there is no ambient state - and
//! every lookup miss degrades to an omitted fragment instead of an error.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

pub mod format;
pub mod pages;
pub mod properties;
pub mod sections;
pub mod sidebar;
pub mod synth;

use crate::schema::{Endpoint, LanguageExamples, SchemaDocument};
use std::collections::BTreeMap;

/// Immutable inputs threaded through every renderer call
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub schema: &'a SchemaDocument,
    pub examples: &'a [LanguageExamples],
    /// Base URL of the live API, used for synthesized wire calls
    pub api_base: &'a str,
}

/// Group endpoints by category, sorted by the category's natural key order
///
/// Endpoint order within a category follows schema declaration order. The
/// page assemblers and the navigation synchronizer both consume this
/// grouping, which is what keeps pages and sidebar referentially
/// consistent.
pub fn group_by_category(schema: &SchemaDocument) -> BTreeMap<&str, Vec<&Endpoint>> {
    let mut groups: BTreeMap<&str, Vec<&Endpoint>> = BTreeMap::new();
    for endpoint in &schema.endpoints {
        groups.entry(endpoint.category.as_str()).or_default().push(endpoint);
    }
    groups
}

/// Title-case a category key for display ("sprite-logs" -> "Sprite Logs")
pub fn title_case(key: &str) -> String {
    key.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_by_category_sorts_keys_keeps_endpoint_order() {
        let schema: SchemaDocument = serde_json::from_value(json!({
            "version": "v1",
            "endpoints": [
                {"name": "B One", "method": "GET", "path": "/b/1", "category": "beta"},
                {"name": "A One", "method": "GET", "path": "/a/1", "category": "alpha"},
                {"name": "B Two", "method": "POST", "path": "/b/2", "category": "beta"},
            ]
        }))
        .unwrap();
        let groups = group_by_category(&schema);
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["alpha", "beta"]);
        let beta: Vec<&str> = groups["beta"].iter().map(|e| e.name.as_str()).collect();
        assert_eq!(beta, vec!["B One", "B Two"]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sprites"), "Sprites");
        assert_eq!(title_case("sprite-logs"), "Sprite Logs");
        assert_eq!(title_case("volume_snapshots"), "Volume Snapshots");
    }
}
