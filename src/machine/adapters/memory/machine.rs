//! In-memory repository for machine registry tests and database-less runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::document::domain::{DocumentKind, DocumentPath};
use crate::machine::{
    domain::{BlockNumber, Machine, MachineId},
    ports::{MachineRepository, MachineRepositoryError, MachineRepositoryResult},
};

/// Thread-safe in-memory machine repository.
///
/// The occupancy check and the write happen under one write lock, so
/// concurrent creators cannot both claim a block.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMachineRepository {
    state: Arc<RwLock<HashMap<MachineId, Machine>>>,
}

impl InMemoryMachineRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> MachineRepositoryError {
    MachineRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Returns the block as occupied when another active machine holds it.
fn ensure_block_free(
    machines: &HashMap<MachineId, Machine>,
    candidate: &Machine,
) -> MachineRepositoryResult<()> {
    if candidate.is_completed() {
        return Ok(());
    }
    let block = candidate.block_no();
    let taken = machines
        .values()
        .any(|existing| existing.id() != candidate.id() && existing.occupies(block));
    if taken {
        return Err(MachineRepositoryError::BlockOccupied(block));
    }
    Ok(())
}

#[async_trait]
impl MachineRepository for InMemoryMachineRepository {
    async fn store(&self, machine: &Machine) -> MachineRepositoryResult<()> {
        let mut machines = self.state.write().map_err(lock_error)?;
        if machines.contains_key(&machine.id()) {
            return Err(MachineRepositoryError::DuplicateMachine(machine.id()));
        }
        ensure_block_free(&machines, machine)?;
        machines.insert(machine.id(), machine.clone());
        Ok(())
    }

    async fn update(&self, machine: &Machine) -> MachineRepositoryResult<()> {
        let mut machines = self.state.write().map_err(lock_error)?;
        if !machines.contains_key(&machine.id()) {
            return Err(MachineRepositoryError::NotFound(machine.id()));
        }
        ensure_block_free(&machines, machine)?;
        machines.insert(machine.id(), machine.clone());
        Ok(())
    }

    async fn attach_document(
        &self,
        id: MachineId,
        kind: DocumentKind,
        path: &DocumentPath,
    ) -> MachineRepositoryResult<Machine> {
        let mut machines = self.state.write().map_err(lock_error)?;
        let machine = machines
            .get_mut(&id)
            .ok_or(MachineRepositoryError::NotFound(id))?;
        machine.attach_document(kind, path.clone());
        Ok(machine.clone())
    }

    async fn find_by_id(&self, id: MachineId) -> MachineRepositoryResult<Option<Machine>> {
        let machines = self.state.read().map_err(lock_error)?;
        Ok(machines.get(&id).cloned())
    }

    async fn list_all(&self) -> MachineRepositoryResult<Vec<Machine>> {
        let machines = self.state.read().map_err(lock_error)?;
        Ok(machines.values().cloned().collect())
    }

    async fn list_completed(&self) -> MachineRepositoryResult<Vec<Machine>> {
        let machines = self.state.read().map_err(lock_error)?;
        Ok(machines
            .values()
            .filter(|machine| machine.is_completed())
            .cloned()
            .collect())
    }

    async fn exists_active_in_block(&self, block: BlockNumber) -> MachineRepositoryResult<bool> {
        let machines = self.state.read().map_err(lock_error)?;
        Ok(machines.values().any(|machine| machine.occupies(block)))
    }

    async fn delete(&self, id: MachineId) -> MachineRepositoryResult<bool> {
        let mut machines = self.state.write().map_err(lock_error)?;
        Ok(machines.remove(&id).is_some())
    }
}
