//! Type-descriptor formatting
//!
//! Maps the schema's compact, Go-flavored descriptors (`*int`, `[]Sprite`,
//! `map[string]string`) to the display notation used throughout the
//! generated pages. Unrecognized descriptors pass through unchanged - they
//! are assumed to name a user-defined type and resolved elsewhere, so a new
//! backend type never breaks generation.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

/// Format a type descriptor for display
///
/// Optional (`*`) and sequence (`[]`) prefixes recurse on the inner
/// descriptor before applying their own suffix, so `[]*int` is a sequence
/// of optional integers (`integer?[]`) while `*[]int` is an optional
/// sequence (`integer[]?`).
pub fn format_type(descriptor: &str) -> String {
    let descriptor = descriptor.trim();

    if let Some(inner) = descriptor.strip_prefix('*') {
        return format!("{}?", format_type(inner));
    }
    if let Some(inner) = descriptor.strip_prefix("[]") {
        return format!("{}[]", format_type(inner));
    }
    if let Some(body) = descriptor.strip_prefix("map[") {
        return format_map(body);
    }

    match descriptor {
        "string" => "string".to_string(),
        "bool" => "boolean".to_string(),
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" => "integer".to_string(),
        "float32" | "float64" => "number".to_string(),
        "time.Duration" => "duration".to_string(),
        "time.Time" => "timestamp".to_string(),
        "any" | "interface{}" | "json.RawMessage" => "any".to_string(),
        other => other.to_string(),
    }
}

/// `map[K]V` collapses to `object` unless both sides are plain strings
fn format_map(body: &str) -> String {
    if let Some(close) = body.find(']') {
        let key = &body[..close];
        let value = body[close + 1..].trim();
        if key == "string" && value == "string" {
            return "map<string, string>".to_string();
        }
    }
    "object".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_table() {
        assert_eq!(format_type("string"), "string");
        assert_eq!(format_type("bool"), "boolean");
        assert_eq!(format_type("int"), "integer");
        assert_eq!(format_type("int64"), "integer");
        assert_eq!(format_type("uint16"), "integer");
        assert_eq!(format_type("float64"), "number");
        assert_eq!(format_type("time.Duration"), "duration");
        assert_eq!(format_type("time.Time"), "timestamp");
        assert_eq!(format_type("interface{}"), "any");
    }

    #[test]
    fn test_optional_and_sequence_markers() {
        assert_eq!(format_type("*string"), "string?");
        assert_eq!(format_type("[]string"), "string[]");
        assert_eq!(format_type("[]Sprite"), "Sprite[]");
        assert_eq!(format_type("*Sprite"), "Sprite?");
    }

    #[test]
    fn test_composition_order_is_pinned() {
        // Sequence of optional integers vs optional sequence of integers:
        // the descriptor prefix order decides the nesting of the suffixes.
        assert_eq!(format_type("[]*int"), "integer?[]");
        assert_eq!(format_type("*[]int"), "integer[]?");
        assert_eq!(format_type("[][]string"), "string[][]");
    }

    #[test]
    fn test_map_cases() {
        assert_eq!(format_type("map[string]string"), "map<string, string>");
        assert_eq!(format_type("map[string]int"), "object");
        assert_eq!(format_type("map[string]interface{}"), "object");
        assert_eq!(format_type("map["), "object");
    }

    #[test]
    fn test_unknown_descriptors_pass_through() {
        assert_eq!(format_type("Sprite"), "Sprite");
        assert_eq!(format_type("SpriteList"), "SpriteList");
        // A brand-new backend type must never break generation.
        assert_eq!(format_type("somepkg.Exotic"), "somepkg.Exotic");
    }

    #[test]
    fn test_idempotent_on_display_strings() {
        for descriptor in [
            "string",
            "bool",
            "int",
            "float64",
            "time.Duration",
            "time.Time",
            "any",
            "*string",
            "[]int",
            "[]*int",
            "*[]int",
            "map[string]string",
        ] {
            let once = format_type(descriptor);
            assert_eq!(format_type(&once), once, "not idempotent for {descriptor}");
        }
    }
}
