//! Repository port for QC form persistence.

use crate::machine::domain::MachineId;
use crate::qc_form::domain::{QcForm, QcFormId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for QC form repository operations.
pub type QcFormRepositoryResult<T> = Result<T, QcFormRepositoryError>;

/// QC form persistence contract.
#[async_trait]
pub trait QcFormRepository: Send + Sync {
    /// Stores a new form.
    ///
    /// # Errors
    ///
    /// Returns [`QcFormRepositoryError::DuplicateForm`] when the ID already
    /// exists.
    async fn store(&self, form: &QcForm) -> QcFormRepositoryResult<()>;

    /// Overwrites an existing form.
    ///
    /// # Errors
    ///
    /// Returns [`QcFormRepositoryError::NotFound`] when the form does not
    /// exist.
    async fn update(&self, form: &QcForm) -> QcFormRepositoryResult<()>;

    /// Finds a form by identifier.
    async fn find_by_id(&self, id: QcFormId) -> QcFormRepositoryResult<Option<QcForm>>;

    /// Returns every stored form.
    async fn list_all(&self) -> QcFormRepositoryResult<Vec<QcForm>>;

    /// Returns every form recorded against `machine_id`.
    async fn find_by_machine_id(&self, machine_id: MachineId)
    -> QcFormRepositoryResult<Vec<QcForm>>;

    /// Deletes a form by identifier.
    ///
    /// Returns `false` when no form had the identifier.
    async fn delete(&self, id: QcFormId) -> QcFormRepositoryResult<bool>;
}

/// Errors returned by QC form repository implementations.
#[derive(Debug, Clone, Error)]
pub enum QcFormRepositoryError {
    /// A form with the same identifier already exists.
    #[error("duplicate QC form identifier: {0}")]
    DuplicateForm(QcFormId),

    /// The form was not found.
    #[error("QC form not found: {0}")]
    NotFound(QcFormId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl QcFormRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
