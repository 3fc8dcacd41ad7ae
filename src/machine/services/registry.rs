//! Service layer for machine registration, completion, and documents.

use crate::document::{
    domain::{DocumentKind, DocumentPath, DocumentUpload, StoredDocument},
    ports::{DocumentStore, DocumentStoreError},
};
use crate::machine::{
    domain::{
        BlockGrid, BlockNumber, BlockSlot, Machine, MachineDetails, MachineDomainError, MachineId,
        block_map,
    },
    ports::{MachineRepository, MachineRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for placing a new machine on the floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMachineRequest {
    details: MachineDetails,
    completed: bool,
    electric_drawing_path: Option<String>,
    block_no: Option<i64>,
}

impl RegisterMachineRequest {
    /// Creates a request with the machine name and requested block.
    ///
    /// The block is validated by [`MachineRegistryService::create`]; `None`
    /// is rejected there.
    #[must_use]
    pub fn new(name: impl Into<String>, block_no: Option<i64>) -> Self {
        Self {
            details: MachineDetails {
                name: name.into(),
                ..MachineDetails::default()
            },
            completed: false,
            electric_drawing_path: None,
            block_no,
        }
    }

    /// Sets the free-text status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.details.status = status.into();
        self
    }

    /// Sets the shop-floor machine number.
    #[must_use]
    pub fn with_machine_no(mut self, machine_no: impl Into<String>) -> Self {
        self.details.machine_no = machine_no.into();
        self
    }

    /// Sets the model designation.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.details.model = model.into();
        self
    }

    /// Sets the product number.
    #[must_use]
    pub fn with_product_no(mut self, product_no: impl Into<String>) -> Self {
        self.details.product_no = product_no.into();
        self
    }

    /// Sets the initial completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Sets a free-text pointer to an electric drawing.
    ///
    /// This is recorded verbatim and is not a stored upload; use
    /// [`MachineRegistryService::upload_drawing`] to store a drawing.
    #[must_use]
    pub fn with_electric_drawing_path(mut self, path: impl Into<String>) -> Self {
        self.electric_drawing_path = Some(path.into());
        self
    }
}

/// Service-level errors for machine registry operations.
#[derive(Debug, Error)]
pub enum MachineRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MachineDomainError),

    /// A non-completed machine already holds the requested block.
    #[error("Block number {0} already occupied.")]
    BlockOccupied(BlockNumber),

    /// No machine has the identifier.
    #[error("Machine not found: {0}")]
    NotFound(MachineId),

    /// An upload request carried no file, or an empty one.
    #[error("No {0} file uploaded")]
    MissingUpload(DocumentKind),

    /// The machine has no document of the requested kind.
    #[error("Machine {machine_id} has no {kind} attached")]
    DocumentNotAttached {
        /// Machine that was queried.
        machine_id: MachineId,
        /// Requested document kind.
        kind: DocumentKind,
    },

    /// Document storage failed.
    #[error(transparent)]
    Document(#[from] DocumentStoreError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(MachineRepositoryError),
}

impl From<MachineRepositoryError> for MachineRegistryError {
    fn from(err: MachineRepositoryError) -> Self {
        match err {
            MachineRepositoryError::BlockOccupied(block) => Self::BlockOccupied(block),
            MachineRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for machine registry service operations.
pub type MachineRegistryResult<T> = Result<T, MachineRegistryError>;

/// Machine registry orchestration service.
pub struct MachineRegistryService<R, D, C>
where
    R: MachineRepository + ?Sized,
    D: DocumentStore + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    documents: Arc<D>,
    clock: Arc<C>,
    grid: BlockGrid,
}

impl<R, D, C> Clone for MachineRegistryService<R, D, C>
where
    R: MachineRepository + ?Sized,
    D: DocumentStore + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            documents: Arc::clone(&self.documents),
            clock: Arc::clone(&self.clock),
            grid: self.grid,
        }
    }
}

impl<R, D, C> MachineRegistryService<R, D, C>
where
    R: MachineRepository + ?Sized,
    D: DocumentStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new machine registry service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        documents: Arc<D>,
        clock: Arc<C>,
        grid: BlockGrid,
    ) -> Self {
        Self {
            repository,
            documents,
            clock,
            grid,
        }
    }

    /// Returns the floor grid new machines are validated against.
    #[must_use]
    pub const fn grid(&self) -> BlockGrid {
        self.grid
    }

    /// Returns every machine.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::Repository`] when the lookup fails.
    pub async fn list_all(&self) -> MachineRegistryResult<Vec<Machine>> {
        Ok(self.repository.list_all().await?)
    }

    /// Returns every completed machine.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::Repository`] when the lookup fails.
    pub async fn list_completed(&self) -> MachineRegistryResult<Vec<Machine>> {
        Ok(self.repository.list_completed().await?)
    }

    /// Returns one slot per grid block with its active occupant.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::Repository`] when the lookup fails.
    pub async fn block_map(&self) -> MachineRegistryResult<Vec<BlockSlot>> {
        let machines = self.repository.list_all().await?;
        Ok(block_map(self.grid, &machines))
    }

    /// Finds a machine by identifier.
    ///
    /// Returns `Ok(None)` when no machine has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: MachineId) -> MachineRegistryResult<Option<Machine>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Places a new machine on its requested block.
    ///
    /// A non-empty `master_card` upload is stored and recorded as the
    /// machine's master card. Nothing is stored or persisted when the block
    /// is invalid or taken.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::Domain`] when the block is missing or
    /// outside the grid, [`MachineRegistryError::BlockOccupied`] when a
    /// non-completed machine holds it, and [`MachineRegistryError::Document`]
    /// or [`MachineRegistryError::Repository`] on storage failure.
    pub async fn create(
        &self,
        request: RegisterMachineRequest,
        master_card: Option<DocumentUpload>,
    ) -> MachineRegistryResult<Machine> {
        let RegisterMachineRequest {
            details,
            completed,
            electric_drawing_path,
            block_no,
        } = request;

        let block = self.grid.block(block_no)?;
        // Reports the conflict before any upload is written. The repository
        // enforces the same rule atomically on store.
        if self.repository.exists_active_in_block(block).await? {
            warn!(block = block.value(), "block already occupied");
            return Err(MachineRegistryError::BlockOccupied(block));
        }

        let mut machine = Machine::new(details, block, completed);
        if let Some(upload) = master_card.filter(|upload| !upload.is_empty()) {
            let path = self.store_upload(DocumentKind::MasterCard, upload).await?;
            machine.attach_document(DocumentKind::MasterCard, path);
        }
        if let Some(pointer) = electric_drawing_path.filter(|path| !path.trim().is_empty()) {
            machine.attach_document(DocumentKind::ElectricDrawing, DocumentPath::new(pointer));
        }

        self.repository.store(&machine).await?;
        info!(
            machine_id = %machine.id(),
            block = block.value(),
            completed = machine.is_completed(),
            "machine registered"
        );
        Ok(machine)
    }

    /// Marks a machine complete, freeing its block for reuse.
    ///
    /// The historical block number is kept. Completing an already completed
    /// machine succeeds and leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::NotFound`] when the machine does not
    /// exist, or [`MachineRegistryError::Repository`] on persistence failure.
    pub async fn mark_complete(&self, id: MachineId) -> MachineRegistryResult<Machine> {
        let mut machine = self.require(id).await?;
        machine.mark_complete();
        self.repository.update(&machine).await?;
        info!(machine_id = %id, block = machine.block_no().value(), "machine completed");
        Ok(machine)
    }

    /// Deletes a machine record.
    ///
    /// Attached documents and QC forms are left in place. Returns `false`
    /// when no machine had the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::Repository`] on persistence failure.
    pub async fn delete(&self, id: MachineId) -> MachineRegistryResult<bool> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            info!(machine_id = %id, "machine deleted");
        }
        Ok(deleted)
    }

    /// Stores an electric drawing and records it on the machine.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::NotFound`] when the machine does not
    /// exist, [`MachineRegistryError::MissingUpload`] when `upload` is absent
    /// or empty, and a storage error when writing fails.
    pub async fn upload_drawing(
        &self,
        id: MachineId,
        upload: Option<DocumentUpload>,
    ) -> MachineRegistryResult<DocumentPath> {
        self.attach_upload(id, DocumentKind::ElectricDrawing, upload)
            .await
    }

    /// Stores a master card and records it on the machine.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::NotFound`] when the machine does not
    /// exist, [`MachineRegistryError::MissingUpload`] when `upload` is absent
    /// or empty, and a storage error when writing fails.
    pub async fn upload_master_card(
        &self,
        id: MachineId,
        upload: Option<DocumentUpload>,
    ) -> MachineRegistryResult<DocumentPath> {
        self.attach_upload(id, DocumentKind::MasterCard, upload).await
    }

    /// Reads the machine's electric drawing.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::NotFound`],
    /// [`MachineRegistryError::DocumentNotAttached`], or
    /// [`MachineRegistryError::Document`] when the machine, its drawing
    /// path, or the stored file is missing.
    pub async fn drawing(&self, id: MachineId) -> MachineRegistryResult<StoredDocument> {
        self.read_document(id, DocumentKind::ElectricDrawing).await
    }

    /// Reads the machine's master card.
    ///
    /// # Errors
    ///
    /// Returns [`MachineRegistryError::NotFound`],
    /// [`MachineRegistryError::DocumentNotAttached`], or
    /// [`MachineRegistryError::Document`] when the machine, its master-card
    /// path, or the stored file is missing.
    pub async fn master_card(&self, id: MachineId) -> MachineRegistryResult<StoredDocument> {
        self.read_document(id, DocumentKind::MasterCard).await
    }

    async fn require(&self, id: MachineId) -> MachineRegistryResult<Machine> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(MachineRegistryError::NotFound(id))
    }

    async fn store_upload(
        &self,
        kind: DocumentKind,
        upload: DocumentUpload,
    ) -> MachineRegistryResult<DocumentPath> {
        let path = DocumentPath::for_upload(kind, upload.original_name(), self.clock.utc());
        self.documents.save(&path, upload.into_contents()).await?;
        Ok(path)
    }

    async fn attach_upload(
        &self,
        id: MachineId,
        kind: DocumentKind,
        upload: Option<DocumentUpload>,
    ) -> MachineRegistryResult<DocumentPath> {
        self.require(id).await?;
        let file = upload
            .filter(|candidate| !candidate.is_empty())
            .ok_or(MachineRegistryError::MissingUpload(kind))?;

        let path = self.store_upload(kind, file).await?;
        self.repository.attach_document(id, kind, &path).await?;
        info!(machine_id = %id, document = %path, kind = kind.tag(), "document attached");
        Ok(path)
    }

    async fn read_document(
        &self,
        id: MachineId,
        kind: DocumentKind,
    ) -> MachineRegistryResult<StoredDocument> {
        let machine = self.require(id).await?;
        let path = machine
            .document(kind)
            .cloned()
            .ok_or(MachineRegistryError::DocumentNotAttached {
                machine_id: id,
                kind,
            })?;
        let contents = self.documents.read(&path).await?;
        Ok(StoredDocument::new(path, contents))
    }
}
