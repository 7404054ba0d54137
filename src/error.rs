//! Error kinds surfaced by the library layer.
//!
//! Missing keys and unmapped literals are not errors: they are skipped per
//! match so a document can be partially annotated or rewritten.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The corpus file is missing, unreadable, or not a JSON object.
    #[error("Failed to read corpus file {}: {reason}", path.display())]
    CorpusUnreadable { path: PathBuf, reason: String },

    /// A command needs a document but none is active.
    #[error("No active document")]
    NoActiveDocument,

    /// The file extension is outside the supported set.
    #[error("Unsupported file type: {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
