//! Machine registry: floor-block placement, completion, and attached
//! documents.
//!
//! Machines are placed on numbered floor blocks. A block holds at most one
//! non-completed machine; completing a machine frees its block while keeping
//! the historical block number. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
