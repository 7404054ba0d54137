//! vvtrans - inline translations for LMID-keyed i18n code
//!
//! vvtrans shows the corpus text next to `t("LMID_12345678")` key references
//! and rewrites literal `t("Hello")` calls into key-based calls that keep the
//! original text as a comment.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line host (annotate, rewrite, watch, init, serve)
//! - `config`: Configuration file loading and parsing
//! - `core`: Corpus, scanning, decoration cache, rendering, and rewriting
//! - `error`: Library error kinds
//! - `mcp`: Model Context Protocol server implementation
//! - `session`: Event-driven session that hosts drive

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod mcp;
pub mod session;

pub use error::{Error, Result};
