//! In-memory adapters for QC form persistence.

mod form;

pub use form::InMemoryQcFormRepository;
