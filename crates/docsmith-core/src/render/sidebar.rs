//! Sidebar navigation synchronized with the generated pages
//!
//! The sidebar is derived from the same category/endpoint grouping the page
//! assemblers consume, in a single linear pass: the fixed Overview entry,
//! the manually curated pages, one group per generated category, and the
//! fixed Type Definitions entry. Link fragments reuse
//! [`crate::render::sections::anchor_id`], so a sidebar entry always points
//! at an anchor the page actually emits.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

use crate::render::sections::anchor_id;
use crate::render::title_case;
use crate::schema::Endpoint;
use serde::{Deserialize, Serialize};

/// One sidebar entry: a link or a collapsible group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SidebarEntry {
    Link(SidebarLink),
    Group(SidebarGroup),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarLink {
    pub label: String,
    /// Page path, optionally with a `#fragment`
    pub target: String,
    /// Optional badge text rendered next to the label
    pub badge: Option<String>,
    /// Optional attribute string (lowercased HTTP method for endpoint
    /// links); decoration only, never part of the target
    pub attrs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarGroup {
    pub label: String,
    pub collapsed: bool,
    pub children: Vec<SidebarEntry>,
}

impl SidebarLink {
    fn plain(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            badge: None,
            attrs: None,
        }
    }
}

/// A hand-authored page merged into every version's output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManualPage {
    pub title: String,
    /// File stem under the manual-pages directory (`quickstart` ->
    /// `quickstart.md`)
    pub slug: String,
    /// Sub-operations the page documents, if any
    #[serde(default)]
    pub ops: Vec<ManualOp>,
}

/// One documented operation on a manual page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualOp {
    pub name: String,
    pub method: String,
}

/// Build the sidebar tree for one version
///
/// `categories` is the same sorted grouping the page assemblers fold over.
pub fn build_sidebar(
    manual_pages: &[ManualPage],
    categories: &[(&str, Vec<&Endpoint>)],
) -> Vec<SidebarEntry> {
    let mut entries = vec![SidebarEntry::Link(SidebarLink::plain("Overview", "index.md"))];

    for page in manual_pages {
        let target = format!("{}.md", page.slug);
        if page.ops.is_empty() {
            entries.push(SidebarEntry::Link(SidebarLink::plain(&page.title, target)));
        } else {
            entries.push(SidebarEntry::Group(SidebarGroup {
                label: page.title.clone(),
                collapsed: true,
                children: page
                    .ops
                    .iter()
                    .map(|op| {
                        SidebarEntry::Link(SidebarLink {
                            label: op.name.clone(),
                            target: format!("{target}#{}", anchor_id(&op.name)),
                            badge: None,
                            attrs: Some(op.method.to_lowercase()),
                        })
                    })
                    .collect(),
            }));
        }
    }

    for (category, endpoints) in categories {
        entries.push(SidebarEntry::Group(SidebarGroup {
            label: title_case(category),
            collapsed: true,
            children: endpoints
                .iter()
                .map(|endpoint| {
                    SidebarEntry::Link(SidebarLink {
                        label: endpoint.name.clone(),
                        target: format!("{category}.md#{}", anchor_id(&endpoint.name)),
                        badge: None,
                        attrs: Some(endpoint.method.to_lowercase()),
                    })
                })
                .collect(),
        }));
    }

    entries.push(SidebarEntry::Link(SidebarLink::plain(
        "Type Definitions",
        "types.md",
    )));
    entries
}

/// Serialize the sidebar to the `_sidebar-config` snippet
///
/// A nested markdown list, human-copyable into the static site's
/// hand-maintained sidebar. Attrs and the collapsed flag are emitted as
/// trailing comments so they survive the copy without affecting targets.
pub fn emit_sidebar(entries: &[SidebarEntry]) -> String {
    let mut out = String::new();
    emit_entries(&mut out, entries, 0);
    out
}

fn emit_entries(out: &mut String, entries: &[SidebarEntry], depth: usize) {
    let indent = "  ".repeat(depth);
    for entry in entries {
        match entry {
            SidebarEntry::Link(link) => {
                out.push_str(&format!("{indent}- [{}]({})", link.label, link.target));
                if let Some(badge) = &link.badge {
                    out.push_str(&format!(" `{badge}`"));
                }
                if let Some(attrs) = &link.attrs {
                    out.push_str(&format!(" <!-- {attrs} -->"));
                }
                out.push('\n');
            }
            SidebarEntry::Group(group) => {
                out.push_str(&format!("{indent}- {}", group.label));
                if group.collapsed {
                    out.push_str(" <!-- collapsed -->");
                }
                out.push('\n');
                emit_entries(out, &group.children, depth + 1);
            }
        }
    }
}
