//! In-memory repository for QC forms.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::machine::domain::MachineId;
use crate::qc_form::{
    domain::{QcForm, QcFormId},
    ports::{QcFormRepository, QcFormRepositoryError, QcFormRepositoryResult},
};

/// Thread-safe in-memory QC form repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQcFormRepository {
    state: Arc<RwLock<HashMap<QcFormId, QcForm>>>,
}

impl InMemoryQcFormRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> QcFormRepositoryError {
    QcFormRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl QcFormRepository for InMemoryQcFormRepository {
    async fn store(&self, form: &QcForm) -> QcFormRepositoryResult<()> {
        let mut forms = self.state.write().map_err(lock_error)?;
        if forms.contains_key(&form.id()) {
            return Err(QcFormRepositoryError::DuplicateForm(form.id()));
        }
        forms.insert(form.id(), form.clone());
        Ok(())
    }

    async fn update(&self, form: &QcForm) -> QcFormRepositoryResult<()> {
        let mut forms = self.state.write().map_err(lock_error)?;
        let Some(slot) = forms.get_mut(&form.id()) else {
            return Err(QcFormRepositoryError::NotFound(form.id()));
        };
        form.clone_into(slot);
        Ok(())
    }

    async fn find_by_id(&self, id: QcFormId) -> QcFormRepositoryResult<Option<QcForm>> {
        let forms = self.state.read().map_err(lock_error)?;
        Ok(forms.get(&id).cloned())
    }

    async fn list_all(&self) -> QcFormRepositoryResult<Vec<QcForm>> {
        let forms = self.state.read().map_err(lock_error)?;
        Ok(forms.values().cloned().collect())
    }

    async fn find_by_machine_id(
        &self,
        machine_id: MachineId,
    ) -> QcFormRepositoryResult<Vec<QcForm>> {
        let forms = self.state.read().map_err(lock_error)?;
        Ok(forms
            .values()
            .filter(|form| form.machine_id() == machine_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: QcFormId) -> QcFormRepositoryResult<bool> {
        let mut forms = self.state.write().map_err(lock_error)?;
        Ok(forms.remove(&id).is_some())
    }
}
