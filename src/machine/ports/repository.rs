//! Repository port for machine persistence and block-occupancy queries.

use crate::document::domain::{DocumentKind, DocumentPath};
use crate::machine::domain::{BlockNumber, Machine, MachineId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for machine repository operations.
pub type MachineRepositoryResult<T> = Result<T, MachineRepositoryError>;

/// Machine persistence contract.
///
/// Implementations must enforce the occupancy invariant atomically: storing
/// or updating a non-completed machine fails with
/// [`MachineRepositoryError::BlockOccupied`] when another non-completed
/// machine already holds the same block, even if a caller's earlier
/// [`exists_active_in_block`](Self::exists_active_in_block) check passed.
#[async_trait]
pub trait MachineRepository: Send + Sync {
    /// Stores a new machine.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRepositoryError::DuplicateMachine`] when the ID
    /// already exists or [`MachineRepositoryError::BlockOccupied`] when the
    /// machine is active and its block is taken.
    async fn store(&self, machine: &Machine) -> MachineRepositoryResult<()>;

    /// Overwrites an existing machine record.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRepositoryError::NotFound`] when the machine does not
    /// exist or [`MachineRepositoryError::BlockOccupied`] when the update
    /// would give a block two active occupants.
    async fn update(&self, machine: &Machine) -> MachineRepositoryResult<()>;

    /// Records `path` as the machine's document of `kind` and returns the
    /// stored record.
    ///
    /// Only the document field is written, so concurrent changes to other
    /// fields such as completion are kept.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRepositoryError::NotFound`] when the machine does not
    /// exist.
    async fn attach_document(
        &self,
        id: MachineId,
        kind: DocumentKind,
        path: &DocumentPath,
    ) -> MachineRepositoryResult<Machine>;

    /// Finds a machine by identifier.
    ///
    /// Returns `None` when the machine does not exist.
    async fn find_by_id(&self, id: MachineId) -> MachineRepositoryResult<Option<Machine>>;

    /// Returns every machine, in no particular order.
    async fn list_all(&self) -> MachineRepositoryResult<Vec<Machine>>;

    /// Returns every machine marked complete.
    async fn list_completed(&self) -> MachineRepositoryResult<Vec<Machine>>;

    /// Returns `true` when a non-completed machine holds `block`.
    async fn exists_active_in_block(&self, block: BlockNumber) -> MachineRepositoryResult<bool>;

    /// Deletes a machine by identifier.
    ///
    /// Returns `false` when no machine had the identifier.
    async fn delete(&self, id: MachineId) -> MachineRepositoryResult<bool>;
}

/// Errors returned by machine repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MachineRepositoryError {
    /// A machine with the same identifier already exists.
    #[error("duplicate machine identifier: {0}")]
    DuplicateMachine(MachineId),

    /// Another non-completed machine already holds the block.
    #[error("Block number {0} already occupied.")]
    BlockOccupied(BlockNumber),

    /// The machine was not found.
    #[error("machine not found: {0}")]
    NotFound(MachineId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MachineRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
