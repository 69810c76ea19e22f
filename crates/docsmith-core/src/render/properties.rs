//! Nested property tree construction
//!
//! Flat field lists (query params, request/response type fields) become a
//! recursively nested property description by resolving type references in
//! the field descriptors. Expansion is depth-capped rather than
//! cycle-detected: the type graph is not guaranteed acyclic, and the cap is
//! the safety valve that keeps traversal finite.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

use crate::render::format::format_type;
use crate::schema::{Field, SchemaDocument};

/// Expansion stops once `depth` exceeds this bound
pub const MAX_DEPTH: usize = 3;

/// One node of the derived property tree
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    /// Wire name, falling back to the internal name
    pub name: String,
    pub type_display: String,
    pub required: bool,
    pub description: String,
    pub children: Vec<PropertyNode>,
}

/// Build the property tree for a flat field list
///
/// A field whose raw descriptor is a bare identifier (optionally carrying
/// one sequence marker) that resolves in the type table expands the
/// referenced type's fields as children at `depth + 1`. Calls with
/// `depth > MAX_DEPTH` return no nodes at all.
pub fn build_properties(
    fields: &[Field],
    schema: &SchemaDocument,
    depth: usize,
) -> Vec<PropertyNode> {
    if depth > MAX_DEPTH {
        return Vec::new();
    }
    fields
        .iter()
        .map(|field| {
            let children = element_type(&field.type_descriptor)
                .and_then(|ident| schema.types.get(ident))
                .map(|def| build_properties(&def.fields, schema, depth + 1))
                .unwrap_or_default();
            PropertyNode {
                name: field.display_name().to_string(),
                type_display: format_type(&field.type_descriptor),
                required: !field.optional,
                description: field.description.clone(),
                children,
            }
        })
        .collect()
}

/// Extract the bare type identifier from a descriptor, tolerating one
/// sequence marker on either side (`[]Sprite` or `Sprite[]`)
fn element_type(descriptor: &str) -> Option<&str> {
    let descriptor = descriptor.trim();
    let ident = descriptor
        .strip_prefix("[]")
        .or_else(|| descriptor.strip_suffix("[]"))
        .unwrap_or(descriptor);
    let valid = !ident.is_empty()
        && ident
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(ident)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeDef;
    use serde_json::json;

    fn field(name: &str, json_name: &str, descriptor: &str, optional: bool) -> Field {
        Field {
            name: name.to_string(),
            json: Some(json_name.to_string()),
            type_descriptor: descriptor.to_string(),
            description: String::new(),
            optional,
            const_value: None,
        }
    }

    fn schema_with(types: &[(&str, Vec<Field>)]) -> SchemaDocument {
        let mut schema: SchemaDocument =
            serde_json::from_value(json!({"version": "v1"})).unwrap();
        for (name, fields) in types {
            schema.types.insert(
                (*name).to_string(),
                TypeDef {
                    description: String::new(),
                    fields: fields.clone(),
                    example: None,
                },
            );
        }
        schema
    }

    #[test]
    fn test_reference_fields_expand_children() {
        let schema = schema_with(&[(
            "Sprite",
            vec![field("Name", "name", "string", false)],
        )]);
        let nodes = build_properties(
            &[field("Sprites", "sprites", "[]Sprite", false)],
            &schema,
            0,
        );
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "sprites");
        assert_eq!(nodes[0].type_display, "Sprite[]");
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0].name, "name");
    }

    #[test]
    fn test_required_negates_optional() {
        let schema = schema_with(&[]);
        let nodes = build_properties(
            &[
                field("Name", "name", "string", false),
                field("Region", "region", "string", true),
            ],
            &schema,
            0,
        );
        assert!(nodes[0].required);
        assert!(!nodes[1].required);
    }

    #[test]
    fn test_unresolved_reference_yields_leaf() {
        let schema = schema_with(&[]);
        let nodes = build_properties(
            &[field("Sprites", "sprites", "[]Sprite", false)],
            &schema,
            0,
        );
        assert!(nodes[0].children.is_empty());
    }

    #[test]
    fn test_depth_cap_terminates_self_reference() {
        // A references A: expansion must terminate, with an empty child
        // list at depth 4 regardless of graph shape.
        let schema = schema_with(&[(
            "Node",
            vec![field("Child", "child", "Node", false)],
        )]);
        let nodes = build_properties(
            &[field("Root", "root", "Node", false)],
            &schema,
            0,
        );

        let mut level = &nodes;
        let mut depth = 0;
        while !level.is_empty() {
            assert_eq!(level.len(), 1);
            level = &level[0].children;
            depth += 1;
            assert!(depth <= 5, "expansion did not terminate");
        }
        // Nodes exist at depths 0..=3; the depth-4 call returned nothing.
        assert_eq!(depth, 4);
    }
}
