//! Document persistence
//!
//! The editor never writes on its own; callers hand a [`DocumentStore`] to
//! [`EditSession::save`](crate::EditSession::save).

use blockcraft_document::{Document, DocumentError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Where documents are loaded from and saved to
pub trait DocumentStore {
    fn load(&self, key: &str) -> Result<Document, StoreError>;
    fn save(&mut self, key: &str, document: &Document) -> Result<(), StoreError>;
    fn exists(&self, key: &str) -> bool;
}

/// JSON files under a root directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `key` with a `.json` extension, relative to the root
    pub fn path_for(&self, key: &str) -> PathBuf {
        let path = self.root.join(key);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension("json")
        }
    }
}

impl DocumentStore for FileStore {
    fn load(&self, key: &str) -> Result<Document, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(StoreError::NotFound(path.display().to_string()));
        }
        Ok(Document::load(&path)?)
    }

    fn save(&mut self, key: &str, document: &Document) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = document.to_json_pretty()?;
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), blocks = document.len(), "Saved document");
        Ok(())
    }

    fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }
}

/// In-memory store for tests and previews
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, Document>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, key: impl Into<String>, document: Document) -> Self {
        self.documents.insert(key.into(), document);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Document> {
        self.documents.get(key)
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Document, StoreError> {
        self.documents
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn save(&mut self, key: &str, document: &Document) -> Result<(), StoreError> {
        self.documents.insert(key.to_string(), document.clone());
        self.saves += 1;
        Ok(())
    }

    fn exists(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcraft_document::BlockNode;

    fn doc() -> Document {
        Document::new(vec![BlockNode::new("a", "core/paragraph").with_attribute("text", "hi")])
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(!store.exists("home"));
        assert!(matches!(store.load("home"), Err(StoreError::NotFound(_))));

        store.save("home", &doc()).unwrap();
        assert_eq!(store.load("home").unwrap(), doc());
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.save("pages/home", &doc()).unwrap();
        assert!(dir.path().join("pages/home.json").exists());
        assert!(store.exists("pages/home"));
        assert_eq!(store.load("pages/home").unwrap(), doc());
    }

    #[test]
    fn test_file_store_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load("nope"), Err(StoreError::NotFound(_))));
    }
}
