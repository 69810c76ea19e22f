//! Typed page-fragment model and the single markdown emit stage
//!
//! Renderers and assemblers build [`Page`]s out of [`Block`]s; nothing in
//! the compiler concatenates markup strings directly. The concrete markdown
//! syntax is decided once, in [`Page::to_markdown`], which keeps fragment
//! construction unit-testable without string-matching generated markup.

use serde::Serialize;

/// A full page document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// One document fragment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// Section heading, optionally carrying an explicit anchor id
    Heading {
        level: u8,
        text: String,
        anchor: Option<String>,
    },
    Paragraph(String),
    /// Fenced code block
    Code { lang: Option<String>, text: String },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Callout { kind: CalloutKind, text: String },
    /// Labeled code-example tabs, in a fixed, meaningful order
    Tabs(Vec<ExampleTab>),
    /// Horizontal rule separating endpoint bundles
    Rule,
    /// Raw passthrough (redirect meta tags)
    Html(String),
}

/// Callout flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalloutKind {
    Note,
    Warning,
}

/// One tab in an example-tabs fragment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleTab {
    /// Tab label shown to the reader ("CLI", "Go", "curl", ...)
    pub label: String,
    /// Code-fence language tag
    pub lang: String,
    pub code: String,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.extend(blocks);
    }

    /// Serialize the page to markdown
    ///
    /// The page title becomes the single level-1 heading; blocks follow in
    /// order, separated by blank lines.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n", self.title));
        for block in &self.blocks {
            out.push('\n');
            emit_block(&mut out, block);
        }
        out
    }
}

fn emit_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading {
            level,
            text,
            anchor,
        } => {
            let marks = "#".repeat((*level).clamp(1, 6) as usize);
            match anchor {
                Some(id) => out.push_str(&format!("{marks} {text} {{#{id}}}\n")),
                None => out.push_str(&format!("{marks} {text}\n")),
            }
        }
        Block::Paragraph(text) => {
            out.push_str(text);
            out.push('\n');
        }
        Block::Code { lang, text } => {
            out.push_str(&format!("```{}\n", lang.as_deref().unwrap_or("")));
            out.push_str(text);
            if !text.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        Block::Table { headers, rows } => {
            emit_table(out, headers, rows);
        }
        Block::Callout { kind, text } => {
            let tag = match kind {
                CalloutKind::Note => "NOTE",
                CalloutKind::Warning => "WARNING",
            };
            out.push_str(&format!("> [!{tag}]\n"));
            for line in text.lines() {
                out.push_str(&format!("> {line}\n"));
            }
        }
        Block::Tabs(tabs) => {
            out.push_str("<!-- tabs:start -->\n");
            for tab in tabs {
                out.push_str(&format!("\n#### **{}**\n\n", tab.label));
                out.push_str(&format!("```{}\n", tab.lang));
                out.push_str(&tab.code);
                if !tab.code.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("```\n");
            }
            out.push_str("\n<!-- tabs:end -->\n");
        }
        Block::Rule => out.push_str("---\n"),
        Block::Html(raw) => {
            out.push_str(raw);
            if !raw.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

fn emit_table(out: &mut String, headers: &[String], rows: &[Vec<String>]) {
    let escape = |cell: &str| cell.replace('|', "\\|").replace('\n', " ");
    out.push_str(&format!(
        "| {} |\n",
        headers.iter().map(|h| escape(h)).collect::<Vec<_>>().join(" | ")
    ));
    out.push_str(&format!("|{}\n", " --- |".repeat(headers.len())));
    for row in rows {
        out.push_str(&format!(
            "| {} |\n",
            row.iter().map(|c| escape(c)).collect::<Vec<_>>().join(" | ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_carries_anchor_id() {
        let mut page = Page::new("API");
        page.push(Block::Heading {
            level: 2,
            text: "List Sprites".to_string(),
            anchor: Some("list-sprites".to_string()),
        });
        let md = page.to_markdown();
        assert!(md.contains("## List Sprites {#list-sprites}"));
    }

    #[test]
    fn test_table_escapes_pipes_and_newlines() {
        let mut page = Page::new("T");
        page.push(Block::Table {
            headers: vec!["Name".to_string(), "Description".to_string()],
            rows: vec![vec!["a|b".to_string(), "line1\nline2".to_string()]],
        });
        let md = page.to_markdown();
        assert!(md.contains("a\\|b"));
        assert!(md.contains("line1 line2"));
    }

    #[test]
    fn test_tabs_emit_in_given_order() {
        let mut page = Page::new("T");
        page.push(Block::Tabs(vec![
            ExampleTab {
                label: "CLI".to_string(),
                lang: "bash".to_string(),
                code: "sprite list".to_string(),
            },
            ExampleTab {
                label: "curl".to_string(),
                lang: "bash".to_string(),
                code: "curl https://api.example.com/v1/sprites".to_string(),
            },
        ]));
        let md = page.to_markdown();
        let cli = md.find("#### **CLI**").unwrap();
        let curl = md.find("#### **curl**").unwrap();
        assert!(cli < curl);
        assert!(md.contains("<!-- tabs:start -->"));
        assert!(md.contains("<!-- tabs:end -->"));
    }

    #[test]
    fn test_code_block_fenced_with_language() {
        let mut page = Page::new("T");
        page.push(Block::Code {
            lang: Some("json".to_string()),
            text: "{\n  \"sprites\": []\n}".to_string(),
        });
        let md = page.to_markdown();
        assert!(md.contains("```json\n{\n  \"sprites\": []\n}\n```"));
    }
}
