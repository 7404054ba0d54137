use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Annotation, SkippedLiteral, TextEdit};

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root
    pub project_root_path: String,
}

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    /// Resolved corpus file path
    pub corpus_path: String,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub enable: bool,
    pub corpus_directory: String,
    pub trans_style: Map<String, Value>,
    pub debounce_ms: u64,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            enable: c.enable,
            corpus_directory: c.corpus_directory,
            trans_style: c.trans_style,
            debounce_ms: c.debounce_ms,
        }
    }
}

// ============================================================
// Annotate Types (annotate_file)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateFileParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Source file, absolute or relative to the project root
    pub file_path: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateFileResult {
    pub file_path: String,
    /// Number of `t("LMID_xxxxxxxx")` references found
    pub total_references: usize,
    /// References whose key has no corpus entry
    pub unresolved_count: usize,
    pub annotations: Vec<AnnotationItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationItem {
    pub key: String,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    pub text: String,
}

impl From<&Annotation> for AnnotationItem {
    fn from(a: &Annotation) -> Self {
        Self {
            key: a.key.clone(),
            line: a.range.start.line + 1,
            column: a.range.start.character + 1,
            text: a.text().to_string(),
        }
    }
}

// ============================================================
// Rewrite Types (rewrite_file)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewriteFileParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Source file, absolute or relative to the project root
    pub file_path: String,
    /// Write the rewritten file (default: false, preview only)
    pub apply: Option<bool>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewriteFileResult {
    pub file_path: String,
    /// True if the file was written
    pub applied: bool,
    pub rewritten_count: usize,
    pub skipped_count: usize,
    pub edits: Vec<RewriteItem>,
    pub skipped: Vec<SkippedItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewriteItem {
    pub line: usize,
    pub column: usize,
    pub key: String,
    pub original: String,
    pub replacement: String,
}

impl From<&TextEdit> for RewriteItem {
    fn from(e: &TextEdit) -> Self {
        Self {
            line: e.range.start.line + 1,
            column: e.range.start.character + 1,
            key: e.key.clone(),
            original: e.original.clone(),
            replacement: e.replacement.clone(),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkippedItem {
    pub line: usize,
    pub column: usize,
    pub literal: String,
}

impl From<&SkippedLiteral> for SkippedItem {
    fn from(s: &SkippedLiteral) -> Self {
        Self {
            line: s.range.start.line + 1,
            column: s.range.start.character + 1,
            literal: s.literal.clone(),
        }
    }
}
