//! Help-text parsing
//!
//! Free-text `help <command>` output is parsed by a line-oriented state
//! machine with explicit states and transitions keyed on line prefixes.
//! Missing sections are fine; a command's help only fails to parse when
//! nothing recognizable is in it at all.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};

/// Parsed structure of one command's help output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedHelp {
    /// Leading prose before any section header
    pub description: String,
    /// Usage line(s)
    pub usage: String,
    pub options: Vec<HelpOption>,
    pub notes: Vec<String>,
    /// Example lines, verbatim
    pub examples: Vec<String>,
}

/// One parsed option row
#[derive(Debug, Clone, PartialEq)]
pub struct HelpOption {
    /// Flag spelling(s), e.g. `-f, --force`
    pub flags: String,
    pub description: String,
}

/// Parser state, advanced once per line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Preamble,
    Usage,
    Options,
    Notes,
    Examples,
}

impl ParseState {
    /// Section-header transition for a line, if it is one
    fn transition(line: &str) -> Option<(ParseState, &str)> {
        let trimmed = line.trim();
        for (prefix, state) in [
            ("Usage:", ParseState::Usage),
            ("Options:", ParseState::Options),
            ("Flags:", ParseState::Options),
            ("Notes:", ParseState::Notes),
            ("Examples:", ParseState::Examples),
        ] {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                return Some((state, rest.trim()));
            }
        }
        None
    }
}

/// Parse one command's help output
pub fn parse_help(text: &str) -> Result<ParsedHelp> {
    let mut state = ParseState::Preamble;
    let mut description_lines: Vec<String> = Vec::new();
    let mut usage_lines: Vec<String> = Vec::new();
    let mut options: Vec<HelpOption> = Vec::new();
    let mut notes: Vec<String> = Vec::new();
    let mut examples: Vec<String> = Vec::new();

    for line in text.lines() {
        if let Some((next, rest)) = ParseState::transition(line) {
            state = next;
            if state == ParseState::Usage && !rest.is_empty() {
                usage_lines.push(rest.to_string());
            }
            continue;
        }
        let trimmed = line.trim();
        match state {
            ParseState::Preamble => {
                if !trimmed.is_empty() {
                    description_lines.push(trimmed.to_string());
                }
            }
            ParseState::Usage => {
                if !trimmed.is_empty() {
                    usage_lines.push(trimmed.to_string());
                }
            }
            ParseState::Options => {
                if trimmed.starts_with('-') {
                    let (flags, description) = split_option(trimmed);
                    options.push(HelpOption { flags, description });
                } else if !trimmed.is_empty() {
                    // Continuation of the previous option's description.
                    if let Some(last) = options.last_mut() {
                        if !last.description.is_empty() {
                            last.description.push(' ');
                        }
                        last.description.push_str(trimmed);
                    }
                }
            }
            ParseState::Notes => {
                if !trimmed.is_empty() {
                    notes.push(trimmed.to_string());
                }
            }
            ParseState::Examples => {
                examples.push(line.trim_end().to_string());
            }
        }
    }

    while examples.last().is_some_and(|l| l.is_empty()) {
        examples.pop();
    }
    while examples.first().is_some_and(|l| l.is_empty()) {
        examples.remove(0);
    }

    let parsed = ParsedHelp {
        description: description_lines.join(" "),
        usage: usage_lines.join("\n"),
        options,
        notes,
        examples,
    };
    if parsed.description.is_empty()
        && parsed.usage.is_empty()
        && parsed.options.is_empty()
    {
        return Err(Error::HelpParse {
            message: "no recognizable sections in help output".to_string(),
        });
    }
    Ok(parsed)
}

/// Split an option line into flags and description on the first run of
/// two or more spaces
fn split_option(line: &str) -> (String, String) {
    match line.find("  ") {
        Some(pos) => (
            line[..pos].trim().to_string(),
            line[pos..].trim().to_string(),
        ),
        None => (line.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HELP: &str = "\
Run a command inside a running sprite.

Usage: sprite exec [options] <name> -- <cmd>

Options:
  -t, --timeout <seconds>  Give up after the given number
                           of seconds.
  -q, --quiet              Suppress command output.

Notes:
  The sprite must be in the running state.

Examples:
  sprite exec my-sprite -- echo hello
";

    #[test]
    fn test_full_help_parses_every_section() {
        let parsed = parse_help(FULL_HELP).unwrap();
        assert_eq!(
            parsed.description,
            "Run a command inside a running sprite."
        );
        assert_eq!(parsed.usage, "sprite exec [options] <name> -- <cmd>");
        assert_eq!(parsed.options.len(), 2);
        assert_eq!(parsed.options[0].flags, "-t, --timeout <seconds>");
        // Multi-line option description folded into one.
        assert_eq!(
            parsed.options[0].description,
            "Give up after the given number of seconds."
        );
        assert_eq!(parsed.notes, vec!["The sprite must be in the running state."]);
        assert_eq!(parsed.examples, vec!["  sprite exec my-sprite -- echo hello"]);
    }

    #[test]
    fn test_missing_sections_are_fine() {
        let parsed = parse_help("Destroy a sprite.\n\nUsage: sprite destroy <name>\n").unwrap();
        assert_eq!(parsed.description, "Destroy a sprite.");
        assert!(parsed.options.is_empty());
        assert!(parsed.notes.is_empty());
        assert!(parsed.examples.is_empty());
    }

    #[test]
    fn test_flags_header_is_an_options_alias() {
        let parsed = parse_help("X.\n\nFlags:\n  -f, --force  Skip confirmation.\n").unwrap();
        assert_eq!(parsed.options.len(), 1);
        assert_eq!(parsed.options[0].flags, "-f, --force");
    }

    #[test]
    fn test_unrecognizable_text_is_a_parse_error() {
        assert!(parse_help("").is_err());
        assert!(parse_help("\n\n   \n").is_err());
    }
}
