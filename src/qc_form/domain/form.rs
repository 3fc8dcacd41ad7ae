//! QC inspection form record.

use super::QcFormId;
use crate::document::domain::DocumentPath;
use crate::machine::domain::MachineId;
use serde::{Deserialize, Serialize};

/// Inspector-entered fields of a QC form. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QcInspection {
    /// Name of the inspector.
    pub inspector_name: Option<String>,
    /// Inspection outcome label.
    pub status: Option<String>,
    /// Free-text remarks.
    pub remarks: Option<String>,
}

/// A QC inspection form recorded against a machine.
///
/// `machine_id` is a plain reference: it is not checked on creation and
/// forms survive deletion of their machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QcForm {
    id: QcFormId,
    machine_id: MachineId,
    #[serde(flatten)]
    inspection: QcInspection,
    pdf_path: Option<DocumentPath>,
}

impl QcForm {
    /// Creates a form with a fresh identifier and no report.
    #[must_use]
    pub fn new(machine_id: MachineId, inspection: QcInspection) -> Self {
        Self {
            id: QcFormId::new(),
            machine_id,
            inspection,
            pdf_path: None,
        }
    }

    /// Reconstructs a form from persisted values.
    #[must_use]
    pub const fn from_persisted(
        id: QcFormId,
        machine_id: MachineId,
        inspection: QcInspection,
        pdf_path: Option<DocumentPath>,
    ) -> Self {
        Self {
            id,
            machine_id,
            inspection,
            pdf_path,
        }
    }

    /// Returns the form identifier.
    #[must_use]
    pub const fn id(&self) -> QcFormId {
        self.id
    }

    /// Returns the referenced machine identifier.
    #[must_use]
    pub const fn machine_id(&self) -> MachineId {
        self.machine_id
    }

    /// Returns the inspector-entered fields.
    #[must_use]
    pub const fn inspection(&self) -> &QcInspection {
        &self.inspection
    }

    /// Returns the path of the generated report, if one was stored.
    #[must_use]
    pub const fn pdf_path(&self) -> Option<&DocumentPath> {
        self.pdf_path.as_ref()
    }

    /// Records the path of the generated report.
    pub fn attach_report(&mut self, path: DocumentPath) {
        self.pdf_path = Some(path);
    }
}
