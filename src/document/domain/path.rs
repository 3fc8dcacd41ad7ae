//! Stored document paths and upload naming.

use super::DocumentKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback file name used when an upload carries no usable name.
const FALLBACK_FILE_NAME: &str = "document.pdf";

/// Path of a document, relative to the upload root.
///
/// Paths produced by [`DocumentPath::for_upload`] always have the shape
/// `<kind directory>/<unix millis>_<kind tag>_<original name>`. Paths loaded
/// from persistence are kept verbatim, since older records may hold free-text
/// pointers supplied by clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Wraps an existing path string without validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds a timestamp-prefixed storage path for a new upload.
    ///
    /// The original name is reduced to its final path segment and any
    /// character outside `[A-Za-z0-9._-]` is replaced with `_`. The timestamp
    /// prefix makes collisions unlikely but not impossible.
    #[must_use]
    pub fn for_upload(
        kind: DocumentKind,
        original_name: Option<&str>,
        stored_at: DateTime<Utc>,
    ) -> Self {
        let file_name = sanitise_file_name(original_name.unwrap_or_default());
        Self(format!(
            "{}/{}_{}_{}",
            kind.directory(),
            stored_at.timestamp_millis(),
            kind.tag(),
            file_name
        ))
    }

    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the final path segment, used as the download file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0
            .rsplit(['/', '\\'])
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME)
    }
}

impl AsRef<str> for DocumentPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitise_file_name(raw: &str) -> String {
    let last_segment = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last_segment
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        FALLBACK_FILE_NAME.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Uploaded document payload awaiting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    original_name: Option<String>,
    contents: Vec<u8>,
}

impl DocumentUpload {
    /// Creates an upload from the client-supplied file name and bytes.
    #[must_use]
    pub const fn new(original_name: Option<String>, contents: Vec<u8>) -> Self {
        Self {
            original_name,
            contents,
        }
    }

    /// Returns the client-supplied file name, if any.
    #[must_use]
    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    /// Returns `true` when the upload carries no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Consumes the upload, returning its bytes.
    #[must_use]
    pub fn into_contents(self) -> Vec<u8> {
        self.contents
    }
}

/// Document bytes read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    path: DocumentPath,
    contents: Vec<u8>,
}

impl StoredDocument {
    /// Pairs a storage path with the bytes read from it.
    #[must_use]
    pub const fn new(path: DocumentPath, contents: Vec<u8>) -> Self {
        Self { path, contents }
    }

    /// Returns the storage path.
    #[must_use]
    pub const fn path(&self) -> &DocumentPath {
        &self.path
    }

    /// Returns the file name for download headers.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.file_name()
    }

    /// Consumes the document, returning its bytes.
    #[must_use]
    pub fn into_contents(self) -> Vec<u8> {
        self.contents
    }
}
