//! In-memory document store for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::document::{
    domain::DocumentPath,
    ports::{DocumentStore, DocumentStoreError, DocumentStoreResult},
};

/// Thread-safe in-memory document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentPath, Vec<u8>>>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> DocumentStoreResult<usize> {
        let documents = self.documents.read().map_err(|err| {
            DocumentStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(documents.len())
    }

    /// Returns `true` when nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Persistence`] when the lock is poisoned.
    pub fn is_empty(&self) -> DocumentStoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn save(&self, path: &DocumentPath, contents: Vec<u8>) -> DocumentStoreResult<()> {
        let mut documents = self.documents.write().map_err(|err| {
            DocumentStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        documents.insert(path.clone(), contents);
        Ok(())
    }

    async fn read(&self, path: &DocumentPath) -> DocumentStoreResult<Vec<u8>> {
        let documents = self.documents.read().map_err(|err| {
            DocumentStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        documents
            .get(path)
            .cloned()
            .ok_or_else(|| DocumentStoreError::NotFound(path.clone()))
    }
}
