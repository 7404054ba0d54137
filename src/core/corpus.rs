//! Translation corpus loading and the derived reverse mapping.
//!
//! The corpus file is a flat JSON object mapping `LMID_xxxxxxxx` keys to
//! translation text. Entries keep file order, which makes the reverse map's
//! collision policy well defined: when several keys share a text, the key
//! that appears last in the file wins.

use std::{
    cell::OnceCell,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::error::{Error, Result};

/// Prefix every translation key starts with.
pub const KEY_PREFIX: &str = "LMID_";

/// Text → key mapping derived from a [`Corpus`].
pub type ReverseCorpus = HashMap<String, String>;

/// Loaded key → translation text mapping.
#[derive(Debug, Default)]
pub struct Corpus {
    entries: Vec<(String, String)>,
    by_key: HashMap<String, usize>,
    reverse: OnceCell<ReverseCorpus>,
}

impl Corpus {
    /// Build a corpus from `(key, text)` pairs. A repeated key keeps its
    /// first position and its last text, matching JSON object semantics.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut corpus = Corpus::default();
        for (key, text) in entries {
            corpus.insert(key.into(), text.into());
        }
        corpus
    }

    fn insert(&mut self, key: String, text: String) {
        match self.by_key.get(&key) {
            Some(&idx) => self.entries[idx].1 = text,
            None => {
                self.by_key.insert(key.clone(), self.entries.len());
                self.entries.push((key, text));
            }
        }
    }

    /// Read and parse a corpus file.
    ///
    /// Fails with [`Error::CorpusUnreadable`] on I/O errors, invalid JSON, or
    /// a top level that is not an object. Non-string values are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let unreadable = |reason: String| Error::CorpusUnreadable {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
        let json: Value = serde_json::from_str(&content).map_err(|e| unreadable(e.to_string()))?;
        let Value::Object(map) = json else {
            return Err(unreadable("expected a JSON object".to_string()));
        };

        let mut corpus = Corpus::default();
        for (key, value) in map {
            match value {
                Value::String(text) => corpus.insert(key, text),
                other => {
                    log::warn!(
                        "Skipping corpus entry {:?} in {}: expected a string, found {}",
                        key,
                        path.display(),
                        json_type_name(&other)
                    );
                }
            }
        }

        log::info!("Loaded {} corpus entries from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.by_key
            .get(key)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The text → key mapping, built on first use and memoized.
    pub fn reverse(&self) -> &ReverseCorpus {
        self.reverse.get_or_init(|| {
            log::debug!("Building reverse corpus over {} entries", self.len());
            self.entries
                .iter()
                .map(|(key, text)| (text.clone(), key.clone()))
                .collect()
        })
    }

    pub fn has_reverse(&self) -> bool {
        self.reverse.get().is_some()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Holds the corpus together with the path it was loaded from.
///
/// A failed load leaves the store empty; every operation that needs the
/// corpus then becomes a no-op until a successful [`CorpusStore::reload`].
#[derive(Debug)]
pub struct CorpusStore {
    path: PathBuf,
    corpus: Option<Corpus>,
}

impl CorpusStore {
    /// A store with nothing loaded yet.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            corpus: None,
        }
    }

    pub fn with_corpus(path: impl Into<PathBuf>, corpus: Corpus) -> Self {
        Self {
            path: path.into(),
            corpus: Some(corpus),
        }
    }

    /// Load the corpus at `path`. On failure the store is returned empty
    /// alongside the error so the caller can report it and keep running.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<Error>) {
        let mut store = Self::empty(path);
        let err = store.reload().err();
        (store, err)
    }

    /// Re-read the corpus file, dropping the memoized reverse map.
    pub fn reload(&mut self) -> Result<()> {
        self.corpus = None;
        self.corpus = Some(Corpus::load(&self.path)?);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn corpus(&self) -> Option<&Corpus> {
        self.corpus.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.corpus.is_some()
    }
}
