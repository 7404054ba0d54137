//! Rendering descriptors and the bounded decoration cache.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::document::Range;

/// Cache size above which [`DecorationCache::maybe_flush`] clears everything.
pub const CACHE_FLUSH_THRESHOLD: usize = 1000;

/// Style attribute that always carries the corpus text and cannot be overridden.
const CONTENT_TEXT: &str = "contentText";

/// Style applied to every annotation unless the user overrides it.
pub fn default_style() -> Map<String, Value> {
    let mut style = Map::new();
    style.insert("fontStyle".to_string(), json!("italic"));
    style.insert("color".to_string(), json!("#FFA22D"));
    style.insert("opacity".to_string(), json!(0.8));
    style
}

/// What gets drawn after a key reference: the translation text plus style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub content_text: String,
    #[serde(flatten)]
    pub style: Map<String, Value>,
}

impl RenderOptions {
    /// Merge `overrides` on top of [`default_style`]. A `contentText`
    /// override is ignored.
    pub fn new(content_text: impl Into<String>, overrides: &Map<String, Value>) -> Self {
        let mut style = default_style();
        for (name, value) in overrides {
            if name == CONTENT_TEXT {
                continue;
            }
            style.insert(name.clone(), value.clone());
        }
        Self {
            content_text: content_text.into(),
            style,
        }
    }

    pub fn color(&self) -> Option<&str> {
        self.style.get("color").and_then(Value::as_str)
    }

    pub fn is_italic(&self) -> bool {
        self.style.get("fontStyle").and_then(Value::as_str) == Some("italic")
    }

    pub fn opacity(&self) -> Option<f64> {
        self.style.get("opacity").and_then(Value::as_f64)
    }
}

/// Identifies one key reference at one place in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecorationKey {
    pub key: String,
    pub range: Range,
}

impl DecorationKey {
    pub fn new(key: impl Into<String>, range: Range) -> Self {
        Self {
            key: key.into(),
            range,
        }
    }
}

/// Memoized render options per (key, range).
///
/// Growth is bounded by a full flush rather than eviction; callers trigger
/// it on document switches so the refresh path stays cheap.
#[derive(Debug, Default)]
pub struct DecorationCache {
    entries: HashMap<DecorationKey, RenderOptions>,
}

impl DecorationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DecorationKey) -> Option<&RenderOptions> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: DecorationKey, options: RenderOptions) {
        self.entries.insert(key, options);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Clear the whole cache if it holds more than [`CACHE_FLUSH_THRESHOLD`]
    /// entries. Returns true if it was flushed.
    pub fn maybe_flush(&mut self) -> bool {
        if self.entries.len() > CACHE_FLUSH_THRESHOLD {
            log::debug!("Flushing decoration cache ({} entries)", self.entries.len());
            self.entries.clear();
            true
        } else {
            false
        }
    }
}
