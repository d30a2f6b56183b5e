//! Whole-document persistence for the knowledge base
//!
//! The document is a single pretty-printed JSON file with two arrays,
//! `features` and `terms`. Nothing is cached between calls: every read
//! loads the file, every write replaces it.
//!
//! Writes go to a temp file in the same directory which is then renamed
//! over the document, so a concurrent reader sees either the old or the new
//! document and never a partially written one.

use serde_json::{json, Value};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::{DesignError, Result};
use crate::types::Collection;

/// The root aggregate, with records kept as raw JSON
///
/// Records stay untyped here so that a single malformed entry can still be
/// listed and counted without blocking the rest of the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub features: Vec<Value>,
    pub terms: Vec<Value>,
}

impl Document {
    /// Build from parsed JSON, coercing missing or non-array collections to empty
    pub fn from_value(value: Value) -> Self {
        let mut root = match value {
            Value::Object(map) => map,
            _ => return Self::default(),
        };

        let mut take = |key: &str| match root.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        Self {
            features: take("features"),
            terms: take("terms"),
        }
    }

    pub fn collection(&self, collection: Collection) -> &[Value] {
        match collection {
            Collection::Features => &self.features,
            Collection::Terms => &self.terms,
        }
    }

    pub fn collection_mut(&mut self, collection: Collection) -> &mut Vec<Value> {
        match collection {
            Collection::Features => &mut self.features,
            Collection::Terms => &mut self.terms,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        let root = json!({
            "features": self.features,
            "terms": self.terms,
        });
        Ok(serde_json::to_string_pretty(&root)?)
    }
}

/// Outcome of a mutation closure passed to [`DocumentStore::mutate`]
pub enum Mutation<T> {
    /// The document changed and must be written back
    Persist(T),
    /// Nothing changed; skip the write
    Unchanged(T),
}

/// File-backed document store
pub struct DocumentStore {
    path: PathBuf,
    /// Serialises load-mutate-persist cycles within this process
    write_lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document; a missing file is an empty document
    pub async fn load(&self) -> Result<Document> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Document {} not found, using empty document", self.path.display());
                return Ok(Document::default());
            }
            Err(e) => {
                return Err(DesignError::Storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            DesignError::Storage(format!(
                "failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(Document::from_value(value))
    }

    /// Replace the file with the whole document
    pub async fn persist(&self, document: &Document) -> Result<()> {
        let content = document.to_json_pretty()?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            DesignError::Storage(format!("failed to create {}: {}", dir.display(), e))
        })?;

        let path = self.path.clone();
        let written = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut file = tempfile::NamedTempFile::new_in(&dir)?;
            file.write_all(content.as_bytes())?;
            file.as_file().sync_all()?;
            file.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| DesignError::Internal(format!("write task failed: {}", e)))?;

        written.map_err(|e| {
            tracing::error!("Failed to write {}: {}", self.path.display(), e);
            DesignError::Storage(format!("failed to write {}: {}", self.path.display(), e))
        })
    }

    /// Run one load-mutate-persist cycle under the write lock
    pub async fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<Mutation<T>>,
    {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        match f(&mut document)? {
            Mutation::Persist(out) => {
                self.persist(&document).await?;
                Ok(out)
            }
            Mutation::Unchanged(out) => Ok(out),
        }
    }
}
