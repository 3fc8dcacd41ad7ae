//! Service layer for recording QC forms and their PDF reports.

use crate::document::{
    domain::{DocumentKind, DocumentPath, StoredDocument},
    ports::{DocumentStore, DocumentStoreError},
};
use crate::machine::domain::MachineId;
use crate::qc_form::{
    domain::{QcForm, QcFormId, QcInspection, QcReport},
    ports::{QcFormRepository, QcFormRepositoryError, QcReportRenderer, RenderError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for recording a QC form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQcFormRequest {
    machine_id: MachineId,
    inspection: QcInspection,
}

impl CreateQcFormRequest {
    /// Creates a request for the given machine with no inspection fields.
    #[must_use]
    pub fn new(machine_id: MachineId) -> Self {
        Self {
            machine_id,
            inspection: QcInspection::default(),
        }
    }

    /// Sets the inspector name.
    #[must_use]
    pub fn with_inspector_name(mut self, inspector_name: impl Into<String>) -> Self {
        self.inspection.inspector_name = Some(inspector_name.into());
        self
    }

    /// Sets the inspection outcome label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.inspection.status = Some(status.into());
        self
    }

    /// Sets the free-text remarks.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.inspection.remarks = Some(remarks.into());
        self
    }

    /// Replaces all inspection fields at once.
    #[must_use]
    pub fn with_inspection(mut self, inspection: QcInspection) -> Self {
        self.inspection = inspection;
        self
    }
}

/// Service-level errors for QC form operations.
#[derive(Debug, Error)]
pub enum QcFormServiceError {
    /// No form has the identifier.
    #[error("QC form not found: {0}")]
    NotFound(QcFormId),

    /// The form has no stored report.
    #[error("QC form {0} has no report")]
    ReportMissing(QcFormId),

    /// Report rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Document storage failed.
    #[error(transparent)]
    Document(#[from] DocumentStoreError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(QcFormRepositoryError),
}

impl From<QcFormRepositoryError> for QcFormServiceError {
    fn from(err: QcFormRepositoryError) -> Self {
        match err {
            QcFormRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for QC form service operations.
pub type QcFormServiceResult<T> = Result<T, QcFormServiceError>;

/// QC form orchestration service.
pub struct QcFormService<R, D, P, C>
where
    R: QcFormRepository + ?Sized,
    D: DocumentStore + ?Sized,
    P: QcReportRenderer + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    documents: Arc<D>,
    renderer: Arc<P>,
    clock: Arc<C>,
}

impl<R, D, P, C> Clone for QcFormService<R, D, P, C>
where
    R: QcFormRepository + ?Sized,
    D: DocumentStore + ?Sized,
    P: QcReportRenderer + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            documents: Arc::clone(&self.documents),
            renderer: Arc::clone(&self.renderer),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, D, P, C> QcFormService<R, D, P, C>
where
    R: QcFormRepository + ?Sized,
    D: DocumentStore + ?Sized,
    P: QcReportRenderer + ?Sized + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new QC form service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        documents: Arc<D>,
        renderer: Arc<P>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            documents,
            renderer,
            clock,
        }
    }

    /// Records a QC form and generates its PDF report.
    ///
    /// The form is persisted before the report is generated. If rendering,
    /// storing, or recording the report fails, the failure is logged and
    /// the form is returned without a `pdf_path`.
    ///
    /// # Errors
    ///
    /// Returns [`QcFormServiceError::Repository`] when the initial insert
    /// fails.
    pub async fn create(&self, request: CreateQcFormRequest) -> QcFormServiceResult<QcForm> {
        let CreateQcFormRequest {
            machine_id,
            inspection,
        } = request;
        let form = QcForm::new(machine_id, inspection);
        self.repository.store(&form).await?;
        info!(qc_form_id = %form.id(), machine_id = %machine_id, "QC form recorded");

        match self.attach_report(&form).await {
            Ok(with_report) => Ok(with_report),
            Err(err) => {
                warn!(
                    qc_form_id = %form.id(),
                    error = %err,
                    "QC report generation failed; form kept without report"
                );
                Ok(form)
            }
        }
    }

    /// Returns every form recorded against `machine_id`.
    ///
    /// # Errors
    ///
    /// Returns [`QcFormServiceError::Repository`] when the lookup fails.
    pub async fn list_for_machine(
        &self,
        machine_id: MachineId,
    ) -> QcFormServiceResult<Vec<QcForm>> {
        Ok(self.repository.find_by_machine_id(machine_id).await?)
    }

    /// Finds a form by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`QcFormServiceError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: QcFormId) -> QcFormServiceResult<Option<QcForm>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Reads the stored PDF report of a form.
    ///
    /// # Errors
    ///
    /// Returns [`QcFormServiceError::NotFound`],
    /// [`QcFormServiceError::ReportMissing`], or
    /// [`QcFormServiceError::Document`] when the form, its report path, or
    /// the stored file is missing.
    pub async fn report(&self, id: QcFormId) -> QcFormServiceResult<StoredDocument> {
        let form = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(QcFormServiceError::NotFound(id))?;
        let path = form
            .pdf_path()
            .cloned()
            .ok_or(QcFormServiceError::ReportMissing(id))?;
        let contents = self.documents.read(&path).await?;
        Ok(StoredDocument::new(path, contents))
    }

    async fn attach_report(&self, form: &QcForm) -> QcFormServiceResult<QcForm> {
        let report = QcReport::for_form(form);
        let file_name = report.file_name();
        let contents = self.render(report).await?;
        let path = DocumentPath::for_upload(
            DocumentKind::QcReport,
            Some(file_name.as_str()),
            self.clock.utc(),
        );
        self.documents.save(&path, contents).await?;

        let mut updated = form.clone();
        updated.attach_report(path);
        self.repository.update(&updated).await?;
        info!(qc_form_id = %updated.id(), "QC report stored");
        Ok(updated)
    }

    /// Runs the renderer on the blocking pool; PDF layout is CPU-bound.
    async fn render(&self, report: QcReport) -> Result<Vec<u8>, RenderError> {
        let renderer = Arc::clone(&self.renderer);
        tokio::task::spawn_blocking(move || renderer.render(&report))
            .await
            .map_err(RenderError::task)?
    }
}
