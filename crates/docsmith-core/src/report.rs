//! End-of-run degradation report
//!
//! Generation never halts for a per-item problem. Anything the compiler had
//! to skip or fall back on - an unresolved `$ref`, a missing SDK snippet, a
//! command whose help text would not parse - is recorded here and reported
//! once, after the run, so a human can triage without blocking the build.

use serde::Serialize;
use tracing::warn;

/// Classification of a degraded item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DegradeCode {
    /// A `$ref` into the type namespace did not resolve
    UnresolvedType,
    /// A `$ref` into the websocket message namespace did not resolve
    UnresolvedMessage,
    /// No canonical example anywhere in the synthesis chain
    MissingExample,
    /// Help text for one CLI command could not be parsed
    HelpParse,
    /// A command's test invocation failed
    CommandTest,
}

impl DegradeCode {
    pub fn label(self) -> &'static str {
        match self {
            DegradeCode::UnresolvedType => "unresolved type ref",
            DegradeCode::UnresolvedMessage => "unresolved message ref",
            DegradeCode::MissingExample => "missing example",
            DegradeCode::HelpParse => "help parse failed",
            DegradeCode::CommandTest => "command test failed",
        }
    }
}

/// One degraded item: what, where, why
#[derive(Debug, Clone, Serialize)]
pub struct DegradedItem {
    pub code: DegradeCode,
    /// Phase of the run ("sprites page", "cliref", ...)
    pub phase: String,
    /// The endpoint, type or command the item concerns
    pub subject: String,
    pub message: String,
}

/// Accumulates degraded items across one whole run
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    items: Vec<DegradedItem>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a degraded item and emit a warning at the point of occurrence
    pub fn record(
        &mut self,
        code: DegradeCode,
        phase: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        let item = DegradedItem {
            code,
            phase: phase.into(),
            subject: subject.into(),
            message: message.into(),
        };
        warn!(
            code = item.code.label(),
            phase = %item.phase,
            subject = %item.subject,
            "{}",
            item.message
        );
        self.items.push(item);
    }

    pub fn items(&self) -> &[DegradedItem] {
        &self.items
    }

    pub fn is_clean(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
