//! Unit tests for document naming and storage adapters.
