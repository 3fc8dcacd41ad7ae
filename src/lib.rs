//! Shopfloor: machine placement, QC inspection, and document tracking for a
//! factory floor.
//!
//! Machines are placed on numbered floor blocks; a block holds at most one
//! machine that is not yet complete. Each machine can carry a master card
//! and an electric drawing, and QC inspection forms recorded against a
//! machine produce a printable PDF report.
//!
//! # Architecture
//!
//! Shopfloor follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence, storage, and
//!   rendering
//! - **Adapters**: Concrete implementations of ports (in-memory,
//!   `PostgreSQL`, filesystem, PDF)
//!
//! # Modules
//!
//! - [`machine`]: Block placement, completion, and attached documents
//! - [`qc_form`]: QC inspection forms and PDF reports
//! - [`document`]: Capability-scoped document storage
//! - [`http`]: The `axum` HTTP surface
//! - [`config`], [`telemetry`], [`persistence`]: Server plumbing

pub mod config;
pub mod document;
pub mod http;
pub mod machine;
pub mod persistence;
pub mod qc_form;
pub mod telemetry;
