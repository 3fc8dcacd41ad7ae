//! Machine aggregate root.

use super::{BlockNumber, MachineId};
use crate::document::domain::{DocumentKind, DocumentPath};
use serde::{Deserialize, Serialize};

/// Status label written when a machine is marked complete.
pub const COMPLETE_STATUS: &str = "COMPLETE";

/// Free-text descriptive fields of a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDetails {
    /// Display name.
    pub name: String,
    /// Free-text status label, e.g. `COMPLETE`.
    pub status: String,
    /// Shop-floor machine number.
    pub machine_no: String,
    /// Model designation.
    pub model: String,
    /// Product number.
    pub product_no: String,
}

/// A machine placed on a floor block.
///
/// Only a non-completed machine occupies its block. Completing a machine
/// keeps its block number for history and frees the block for reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    id: MachineId,
    #[serde(flatten)]
    details: MachineDetails,
    completed: bool,
    master_card_info: Option<DocumentPath>,
    electric_drawing_path: Option<DocumentPath>,
    block_no: BlockNumber,
}

/// Parameter object for reconstructing a persisted machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMachineData {
    /// Persisted machine identifier.
    pub id: MachineId,
    /// Persisted descriptive fields.
    pub details: MachineDetails,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted master-card path, if any.
    pub master_card_info: Option<DocumentPath>,
    /// Persisted electric-drawing path, if any.
    pub electric_drawing_path: Option<DocumentPath>,
    /// Persisted block number.
    pub block_no: BlockNumber,
}

impl Machine {
    /// Creates a new machine on the given block with a fresh identifier.
    #[must_use]
    pub fn new(details: MachineDetails, block_no: BlockNumber, completed: bool) -> Self {
        Self {
            id: MachineId::new(),
            details,
            completed,
            master_card_info: None,
            electric_drawing_path: None,
            block_no,
        }
    }

    /// Reconstructs a machine from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMachineData) -> Self {
        Self {
            id: data.id,
            details: data.details,
            completed: data.completed,
            master_card_info: data.master_card_info,
            electric_drawing_path: data.electric_drawing_path,
            block_no: data.block_no,
        }
    }

    /// Returns the machine identifier.
    #[must_use]
    pub const fn id(&self) -> MachineId {
        self.id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &MachineDetails {
        &self.details
    }

    /// Returns `true` once the machine has been marked complete.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the master-card document path, if any.
    #[must_use]
    pub const fn master_card_info(&self) -> Option<&DocumentPath> {
        self.master_card_info.as_ref()
    }

    /// Returns the electric-drawing document path, if any.
    #[must_use]
    pub const fn electric_drawing_path(&self) -> Option<&DocumentPath> {
        self.electric_drawing_path.as_ref()
    }

    /// Returns the path of the attached document of `kind`, if any.
    #[must_use]
    pub const fn document(&self, kind: DocumentKind) -> Option<&DocumentPath> {
        match kind {
            DocumentKind::MasterCard => self.master_card_info(),
            DocumentKind::ElectricDrawing => self.electric_drawing_path(),
            DocumentKind::QcReport => None,
        }
    }

    /// Returns the (possibly historical) block number.
    #[must_use]
    pub const fn block_no(&self) -> BlockNumber {
        self.block_no
    }

    /// Returns `true` when this machine currently occupies `block`.
    #[must_use]
    pub fn occupies(&self, block: BlockNumber) -> bool {
        !self.completed && self.block_no == block
    }

    /// Marks the machine complete, releasing its block.
    ///
    /// Calling this on an already completed machine leaves it unchanged.
    pub fn mark_complete(&mut self) {
        self.completed = true;
        COMPLETE_STATUS.clone_into(&mut self.details.status);
    }

    /// Records the path of an attached document of `kind`.
    ///
    /// QC reports belong to QC forms and are ignored here.
    pub fn attach_document(&mut self, kind: DocumentKind, path: DocumentPath) {
        match kind {
            DocumentKind::MasterCard => self.master_card_info = Some(path),
            DocumentKind::ElectricDrawing => self.electric_drawing_path = Some(path),
            DocumentKind::QcReport => {}
        }
    }
}
