//! Adapter implementations for machine persistence.

pub mod memory;
pub mod postgres;
