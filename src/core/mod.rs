//! Matching, caching, and substitution logic.
//!
//! ## Module Structure
//!
//! - `corpus`: corpus file loading and the reverse (text → key) mapping
//! - `document`: document text, spans, and line/column positions
//! - `scanner`: key-reference and literal-call pattern matching
//! - `decoration`: render options and the bounded decoration cache
//! - `annotate`: inline overlays for key references
//! - `rewrite`: literal-to-key rewrite planning
//! - `debounce`: clock-driven coalescing of change events

pub mod annotate;
pub mod corpus;
pub mod debounce;
pub mod decoration;
pub mod document;
pub mod rewrite;
pub mod scanner;

pub use annotate::{Annotation, render};
pub use corpus::{Corpus, CorpusStore, KEY_PREFIX, ReverseCorpus};
pub use debounce::{DEFAULT_DEBOUNCE, DebouncedTrigger, Debouncer, debounce};
pub use decoration::{CACHE_FLUSH_THRESHOLD, DecorationCache, DecorationKey, RenderOptions};
pub use document::{Document, Position, Range, SUPPORTED_EXTENSIONS, Span, is_supported_file};
pub use rewrite::{RewritePlan, SkippedLiteral, TextEdit, plan_rewrite};
pub use scanner::{Match, MatchKind, RegexScanner, Scanner};
