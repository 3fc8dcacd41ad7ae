//! Port contracts for QC form persistence and report rendering.

mod renderer;
mod repository;

#[cfg(test)]
pub use renderer::MockQcReportRenderer;
pub use renderer::{QcReportRenderer, RenderError};
pub use repository::{QcFormRepository, QcFormRepositoryError, QcFormRepositoryResult};
