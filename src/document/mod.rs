//! Storage of PDF documents attached to machines and QC forms.
//!
//! Uploads live under a configured root directory, one subdirectory per
//! [`domain::DocumentKind`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
