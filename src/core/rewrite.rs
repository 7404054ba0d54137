//! One-shot conversion of literal translation calls into key-based calls.
//!
//! `t("Hello")` becomes `t("LMID_00000001") /* Hello */` when the reverse
//! corpus maps `Hello` to `LMID_00000001`. Unmapped literals are left alone.

use serde::Serialize;

use super::{
    corpus::ReverseCorpus,
    document::{Document, Range, Span},
    scanner::Scanner,
};

/// Replacement of one literal call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub span: Span,
    pub range: Range,
    pub key: String,
    pub literal: String,
    pub original: String,
    pub replacement: String,
}

/// A literal call with no reverse-corpus entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLiteral {
    pub span: Span,
    pub range: Range,
    pub literal: String,
}

/// All edits for one rewrite pass, applied together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewritePlan {
    pub edits: Vec<TextEdit>,
    pub skipped: Vec<SkippedLiteral>,
}

impl RewritePlan {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply every edit to `text` in a single pass.
    ///
    /// Edits are ordered and non-overlapping because the scan moves strictly
    /// forward past each match.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for edit in &self.edits {
            debug_assert!(edit.span.start >= cursor);
            out.push_str(&text[cursor..edit.span.start]);
            out.push_str(&edit.replacement);
            cursor = edit.span.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

/// Build the rewrite plan for `document`.
pub fn plan_rewrite(
    document: &Document,
    reverse: &ReverseCorpus,
    scanner: &dyn Scanner,
) -> RewritePlan {
    let mut plan = RewritePlan::default();
    for m in scanner.scan_literals(document.text()) {
        let range = document.range_of(m.span);
        match reverse.get(&m.capture) {
            Some(key) => {
                let replacement = format!(
                    "t({q}{key}{q}) /* {comment} */",
                    q = m.quote,
                    key = key,
                    comment = escape_comment(&m.capture),
                );
                plan.edits.push(TextEdit {
                    span: m.span,
                    range,
                    key: key.clone(),
                    original: document.slice(m.span).to_string(),
                    literal: m.capture,
                    replacement,
                });
            }
            None => plan.skipped.push(SkippedLiteral {
                span: m.span,
                range,
                literal: m.capture,
            }),
        }
    }
    log::debug!(
        "Rewrite plan for {}: {} edit(s), {} unmapped",
        document.path().display(),
        plan.edits.len(),
        plan.skipped.len()
    );
    plan
}

/// Keep a literal from closing the block comment it is placed in.
fn escape_comment(literal: &str) -> String {
    literal.replace("*/", "*\\/")
}
