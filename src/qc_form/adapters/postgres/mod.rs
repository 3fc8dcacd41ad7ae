//! `PostgreSQL` adapters for QC form persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresQcFormRepository;
