//! Surface pattern matching for translation calls.
//!
//! Two kinds of calls are recognised:
//!
//! - key references: `t("LMID_12345678")`
//! - literal calls: `t("Some text")`
//!
//! Matching is done with regular expressions, not a parser. Callers only
//! depend on the [`Scanner`] trait, so the matching strategy can be replaced
//! by a real tokenizer without touching rendering or rewriting.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{corpus::KEY_PREFIX, document::Span};

static KEY_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"t\((?:"(LMID_\d{8})"|'(LMID_\d{8})')\s*\)"#)
        .expect("key reference regex is valid")
});

static LITERAL_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"t\((?:"((?:[^"\\\r\n]|\\.)*)"|'((?:[^'\\\r\n]|\\.)*)')\)"#)
        .expect("literal call regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    KeyReference,
    Literal,
}

/// One recognised call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub kind: MatchKind,
    /// Span of the whole call, `t(` through `)`.
    pub span: Span,
    /// The key for key references, the literal source text for literal calls.
    pub capture: String,
    /// Quote character used by the string argument.
    pub quote: char,
}

pub trait Scanner {
    /// Key references in text order.
    fn scan_keys(&self, text: &str) -> Vec<Match>;

    /// Literal calls in text order.
    fn scan_literals(&self, text: &str) -> Vec<Match>;

    /// Both kinds, ordered by span start.
    fn scan(&self, text: &str) -> Vec<Match> {
        let mut matches = self.scan_keys(text);
        matches.extend(self.scan_literals(text));
        matches.sort_by_key(|m| m.span);
        matches
    }
}

/// Regex-backed [`Scanner`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexScanner;

impl Scanner for RegexScanner {
    fn scan_keys(&self, text: &str) -> Vec<Match> {
        KEY_REFERENCE_REGEX
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let (capture, quote) = quoted_capture(&caps)?;
                Some(Match {
                    kind: MatchKind::KeyReference,
                    span: Span::new(whole.start(), whole.end()),
                    capture: capture.to_string(),
                    quote,
                })
            })
            .collect()
    }

    fn scan_literals(&self, text: &str) -> Vec<Match> {
        LITERAL_CALL_REGEX
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                if preceded_by_identifier(text, whole.start()) {
                    return None;
                }
                let (capture, quote) = quoted_capture(&caps)?;
                if capture.starts_with(KEY_PREFIX) {
                    return None;
                }
                Some(Match {
                    kind: MatchKind::Literal,
                    span: Span::new(whole.start(), whole.end()),
                    capture: capture.to_string(),
                    quote,
                })
            })
            .collect()
    }
}

/// Group 1 is the double-quoted form, group 2 the single-quoted form.
fn quoted_capture<'t>(caps: &regex::Captures<'t>) -> Option<(&'t str, char)> {
    caps.get(1)
        .map(|m| (m.as_str(), '"'))
        .or_else(|| caps.get(2).map(|m| (m.as_str(), '\'')))
}

fn preceded_by_identifier(text: &str, offset: usize) -> bool {
    text[..offset]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
