//! Port contracts for machine registry persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by machine services.

pub mod repository;

pub use repository::{MachineRepository, MachineRepositoryError, MachineRepositoryResult};
