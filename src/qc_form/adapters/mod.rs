//! Adapter implementations for QC form persistence and rendering.

pub mod memory;
pub mod pdf;
pub mod postgres;
