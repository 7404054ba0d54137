//! Inline translation overlays for key references.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    corpus::Corpus,
    decoration::{DecorationCache, DecorationKey, RenderOptions},
    document::{Document, Range, Span},
    scanner::Scanner,
};

/// One overlay attached after a key reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub key: String,
    pub span: Span,
    pub range: Range,
    pub render_options: RenderOptions,
}

impl Annotation {
    pub fn text(&self) -> &str {
        &self.render_options.content_text
    }
}

/// Compute the complete annotation set for `document`.
///
/// Keys missing from the corpus, or mapped to an empty string, produce no
/// annotation. The result is meant
/// to replace the document's previous set wholesale.
pub fn render(
    document: &Document,
    corpus: &Corpus,
    style: &Map<String, Value>,
    cache: &mut DecorationCache,
    scanner: &dyn Scanner,
) -> Vec<Annotation> {
    let matches = scanner.scan_keys(document.text());
    log::debug!(
        "Rendering {}: {} key reference(s)",
        document.path().display(),
        matches.len()
    );

    let mut annotations = Vec::with_capacity(matches.len());
    for m in matches {
        let range = document.range_of(m.span);
        let cache_key = DecorationKey::new(m.capture.as_str(), range);

        let render_options = match cache.get(&cache_key) {
            Some(cached) => {
                log::trace!("Decoration cache hit for {} at {:?}", m.capture, range.start);
                cached.clone()
            }
            None => {
                let Some(text) = corpus.get(&m.capture).filter(|text| !text.is_empty()) else {
                    log::trace!("No corpus text for {}", m.capture);
                    continue;
                };
                let options = RenderOptions::new(text, style);
                cache.put(cache_key, options.clone());
                options
            }
        };

        annotations.push(Annotation {
            key: m.capture,
            span: m.span,
            range,
            render_options,
        });
    }
    annotations
}
