//! Capability-scoped filesystem document store.

use crate::document::{
    domain::DocumentPath,
    ports::{DocumentStore, DocumentStoreError, DocumentStoreResult},
};
use async_trait::async_trait;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;

/// Document store rooted at a directory capability.
///
/// Every access goes through the opened root [`Dir`], so a stored path can
/// never resolve outside the upload root.
#[derive(Debug, Clone)]
pub struct FilesystemDocumentStore {
    root: Arc<Dir>,
}

impl FilesystemDocumentStore {
    /// Opens `root`, creating it first if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            root: Arc::new(dir),
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> DocumentStoreResult<T>
    where
        F: FnOnce(&Dir) -> DocumentStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || f(&root))
            .await
            .map_err(DocumentStoreError::persistence)?
    }
}

/// Returns the path as a root-relative path, rejecting absolute paths and
/// parent-directory components.
fn contained_path(path: &DocumentPath) -> DocumentStoreResult<Utf8PathBuf> {
    let candidate = Utf8Path::new(path.as_str());
    let has_file = candidate
        .components()
        .any(|component| matches!(component, Utf8Component::Normal(_)));
    let is_contained = candidate
        .components()
        .all(|component| matches!(component, Utf8Component::Normal(_) | Utf8Component::CurDir));
    if !has_file || !is_contained {
        return Err(DocumentStoreError::InvalidPath(path.clone()));
    }
    Ok(candidate.to_owned())
}

fn map_io_error(path: &DocumentPath, err: io::Error) -> DocumentStoreError {
    if err.kind() == io::ErrorKind::NotFound {
        DocumentStoreError::NotFound(path.clone())
    } else {
        DocumentStoreError::persistence(err)
    }
}

#[async_trait]
impl DocumentStore for FilesystemDocumentStore {
    async fn save(&self, path: &DocumentPath, contents: Vec<u8>) -> DocumentStoreResult<()> {
        let relative = contained_path(path)?;
        let target = path.clone();
        self.run_blocking(move |root| {
            if let Some(parent) = relative.parent().filter(|dir| !dir.as_str().is_empty()) {
                root.create_dir_all(parent)
                    .map_err(DocumentStoreError::persistence)?;
            }
            root.write(&relative, contents)
                .map_err(|err| map_io_error(&target, err))
        })
        .await
    }

    async fn read(&self, path: &DocumentPath) -> DocumentStoreResult<Vec<u8>> {
        let relative = contained_path(path)?;
        let target = path.clone();
        self.run_blocking(move |root| root.read(&relative).map_err(|err| map_io_error(&target, err)))
            .await
    }
}
