//! Rendering port that turns a QC report into PDF bytes.

use crate::qc_form::domain::QcReport;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while rendering a report.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The report text could not be produced.
    #[error("report template failed: {0}")]
    Template(Arc<dyn std::error::Error + Send + Sync>),

    /// The PDF document could not be assembled.
    #[error("PDF generation failed: {0}")]
    Pdf(Arc<dyn std::error::Error + Send + Sync>),

    /// The rendering task panicked or was cancelled.
    #[error("report rendering task failed: {0}")]
    Task(Arc<dyn std::error::Error + Send + Sync>),
}

impl RenderError {
    /// Wraps a template failure.
    pub fn template(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Template(Arc::new(err))
    }

    /// Wraps a PDF assembly failure.
    pub fn pdf(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Pdf(Arc::new(err))
    }

    /// Wraps a failure of the task running the renderer.
    pub fn task(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Task(Arc::new(err))
    }
}

/// Produces a printable document for a QC report.
#[cfg_attr(test, mockall::automock)]
pub trait QcReportRenderer: Send + Sync {
    /// Renders `report` as a complete PDF document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the text or the document cannot be
    /// produced.
    fn render(&self, report: &QcReport) -> Result<Vec<u8>, RenderError>;
}
