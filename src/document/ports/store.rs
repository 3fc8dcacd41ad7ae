//! Storage port for document bytes.

use crate::document::domain::DocumentPath;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// Byte storage addressed by [`DocumentPath`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `contents` at `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidPath`] when the path would leave
    /// the store root, or [`DocumentStoreError::Persistence`] on I/O failure.
    async fn save(&self, path: &DocumentPath, contents: Vec<u8>) -> DocumentStoreResult<()>;

    /// Reads the bytes stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::NotFound`] when nothing is stored at the
    /// path or the path points outside the store root.
    async fn read(&self, path: &DocumentPath) -> DocumentStoreResult<Vec<u8>>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// No document exists at the path.
    #[error("document not found: {0}")]
    NotFound(DocumentPath),

    /// The path is absolute or escapes the store root.
    #[error("document path is outside the upload root: {0}")]
    InvalidPath(DocumentPath),

    /// Underlying storage failure.
    #[error("{0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DocumentStoreError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` when the error means the document is absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidPath(_))
    }
}
