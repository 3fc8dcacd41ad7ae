//! `PostgreSQL` adapters for machine persistence.
//!
//! Block occupancy is enforced by the partial unique index
//! `idx_machines_active_block_unique`, so two concurrent creators cannot
//! both claim the same block.

mod models;
mod repository;
mod schema;

pub use repository::PostgresMachineRepository;
