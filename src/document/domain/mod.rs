//! Domain model for stored PDF documents.
//!
//! Documents are opaque byte payloads addressed by a path relative to the
//! upload root. The domain decides how paths are named; adapters only read
//! and write bytes.

mod kind;
mod path;

pub use kind::DocumentKind;
pub use path::{DocumentPath, DocumentUpload, StoredDocument};
