//! Shared handler state.

use super::error::ApiError;
use crate::document::ports::DocumentStore;
use crate::machine::{
    ports::MachineRepository,
    services::{MachineRegistryError, MachineRegistryService},
};
use crate::qc_form::{
    ports::{QcFormRepository, QcReportRenderer},
    services::{QcFormService, QcFormServiceError},
};
use mockable::DefaultClock;

/// Machine registry service over boxed adapters.
pub type MachineRegistry =
    MachineRegistryService<dyn MachineRepository, dyn DocumentStore, DefaultClock>;

/// QC form service over boxed adapters.
pub type QcForms =
    QcFormService<dyn QcFormRepository, dyn DocumentStore, dyn QcReportRenderer, DefaultClock>;

/// Services and response policy shared by every handler.
#[derive(Clone)]
pub struct AppState {
    machines: MachineRegistry,
    qc_forms: QcForms,
    redact_storage_errors: bool,
}

impl AppState {
    /// Creates handler state that reports storage failures verbatim.
    #[must_use]
    pub const fn new(machines: MachineRegistry, qc_forms: QcForms) -> Self {
        Self {
            machines,
            qc_forms,
            redact_storage_errors: false,
        }
    }

    /// Replaces storage failure details with a generic message when `redact`
    /// is set. Details are still logged.
    #[must_use]
    pub const fn with_redacted_storage_errors(mut self, redact: bool) -> Self {
        self.redact_storage_errors = redact;
        self
    }

    /// Returns the machine registry service.
    #[must_use]
    pub const fn machines(&self) -> &MachineRegistry {
        &self.machines
    }

    /// Returns the QC form service.
    #[must_use]
    pub const fn qc_forms(&self) -> &QcForms {
        &self.qc_forms
    }

    pub(crate) fn reject_machine(&self, err: MachineRegistryError) -> ApiError {
        ApiError::from_machine_error(err, self.redact_storage_errors)
    }

    pub(crate) fn reject_qc(&self, err: QcFormServiceError) -> ApiError {
        ApiError::from_qc_error(err, self.redact_storage_errors)
    }
}
