//! Adapter implementations for document storage.

pub mod filesystem;
pub mod memory;

pub use filesystem::FilesystemDocumentStore;
pub use memory::InMemoryDocumentStore;
