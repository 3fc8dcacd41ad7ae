//! `PostgreSQL` repository implementation for machine storage.

use super::{
    models::{MachineRecord, MachineRow},
    schema::machines,
};
use crate::document::domain::{DocumentKind, DocumentPath};
use crate::machine::{
    domain::{BlockNumber, Machine, MachineDetails, MachineId, PersistedMachineData},
    ports::{MachineRepository, MachineRepositoryError, MachineRepositoryResult},
};
use crate::persistence::{PgPool, run_blocking_with};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Name of the partial unique index guarding active block occupancy.
const ACTIVE_BLOCK_INDEX: &str = "idx_machines_active_block_unique";

/// `PostgreSQL`-backed machine repository.
#[derive(Debug, Clone)]
pub struct PostgresMachineRepository {
    pool: PgPool,
}

impl PostgresMachineRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MachineRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MachineRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking_with(&self.pool, f, MachineRepositoryError::persistence).await
    }
}

#[async_trait]
impl MachineRepository for PostgresMachineRepository {
    async fn store(&self, machine: &Machine) -> MachineRepositoryResult<()> {
        let machine_id = machine.id();
        let block = machine.block_no();
        let record = to_record(machine);

        self.run_blocking(move |connection| {
            diesel::insert_into(machines::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_active_block_violation(info.as_ref()) =>
                    {
                        MachineRepositoryError::BlockOccupied(block)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MachineRepositoryError::DuplicateMachine(machine_id)
                    }
                    _ => MachineRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, machine: &Machine) -> MachineRepositoryResult<()> {
        let machine_id = machine.id();
        let block = machine.block_no();
        let record = to_record(machine);

        self.run_blocking(move |connection| {
            let updated = diesel::update(machines::table.find(machine_id.into_inner()))
                .set(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_active_block_violation(info.as_ref()) =>
                    {
                        MachineRepositoryError::BlockOccupied(block)
                    }
                    _ => MachineRepositoryError::persistence(err),
                })?;
            if updated == 0 {
                return Err(MachineRepositoryError::NotFound(machine_id));
            }
            Ok(())
        })
        .await
    }

    async fn attach_document(
        &self,
        id: MachineId,
        kind: DocumentKind,
        path: &DocumentPath,
    ) -> MachineRepositoryResult<Machine> {
        let value = path.as_str().to_owned();
        self.run_blocking(move |connection| {
            let target = machines::table.find(id.into_inner());
            let row = match kind {
                DocumentKind::MasterCard => diesel::update(target)
                    .set(machines::master_card_info.eq(Some(value)))
                    .returning(MachineRow::as_returning())
                    .get_result::<MachineRow>(connection),
                DocumentKind::ElectricDrawing => diesel::update(target)
                    .set(machines::electric_drawing_path.eq(Some(value)))
                    .returning(MachineRow::as_returning())
                    .get_result::<MachineRow>(connection),
                // QC reports are not machine documents.
                DocumentKind::QcReport => target
                    .select(MachineRow::as_select())
                    .first::<MachineRow>(connection),
            }
            .optional()
            .map_err(MachineRepositoryError::persistence)?
            .ok_or(MachineRepositoryError::NotFound(id))?;
            row_to_machine(row)
        })
        .await
    }

    async fn find_by_id(&self, id: MachineId) -> MachineRepositoryResult<Option<Machine>> {
        self.run_blocking(move |connection| {
            let row = machines::table
                .find(id.into_inner())
                .select(MachineRow::as_select())
                .first::<MachineRow>(connection)
                .optional()
                .map_err(MachineRepositoryError::persistence)?;
            row.map(row_to_machine).transpose()
        })
        .await
    }

    async fn list_all(&self) -> MachineRepositoryResult<Vec<Machine>> {
        self.run_blocking(|connection| {
            let rows = machines::table
                .select(MachineRow::as_select())
                .load::<MachineRow>(connection)
                .map_err(MachineRepositoryError::persistence)?;
            rows.into_iter().map(row_to_machine).collect()
        })
        .await
    }

    async fn list_completed(&self) -> MachineRepositoryResult<Vec<Machine>> {
        self.run_blocking(|connection| {
            let rows = machines::table
                .filter(machines::completed.eq(true))
                .select(MachineRow::as_select())
                .load::<MachineRow>(connection)
                .map_err(MachineRepositoryError::persistence)?;
            rows.into_iter().map(row_to_machine).collect()
        })
        .await
    }

    async fn exists_active_in_block(&self, block: BlockNumber) -> MachineRepositoryResult<bool> {
        let block_no = i32::from(block.value());
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                machines::table
                    .filter(machines::block_no.eq(block_no))
                    .filter(machines::completed.eq(false)),
            ))
            .get_result::<bool>(connection)
            .map_err(MachineRepositoryError::persistence)
        })
        .await
    }

    async fn delete(&self, id: MachineId) -> MachineRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(machines::table.find(id.into_inner()))
                .execute(connection)
                .map_err(MachineRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn to_record(machine: &Machine) -> MachineRecord {
    let details = machine.details();
    MachineRecord {
        id: machine.id().into_inner(),
        name: details.name.clone(),
        status: details.status.clone(),
        completed: machine.is_completed(),
        master_card_info: machine.master_card_info().map(|path| path.as_str().to_owned()),
        electric_drawing_path: machine
            .electric_drawing_path()
            .map(|path| path.as_str().to_owned()),
        machine_no: details.machine_no.clone(),
        model: details.model.clone(),
        product_no: details.product_no.clone(),
        block_no: i32::from(machine.block_no().value()),
    }
}

fn row_to_machine(row: MachineRow) -> MachineRepositoryResult<Machine> {
    let MachineRow {
        id,
        name,
        status,
        completed,
        master_card_info,
        electric_drawing_path,
        machine_no,
        model,
        product_no,
        block_no,
    } = row;

    let block = BlockNumber::from_persisted(i64::from(block_no))
        .map_err(MachineRepositoryError::persistence)?;

    Ok(Machine::from_persisted(PersistedMachineData {
        id: MachineId::from_uuid(id),
        details: MachineDetails {
            name,
            status,
            machine_no,
            model,
            product_no,
        },
        completed,
        master_card_info: master_card_info.map(DocumentPath::new),
        electric_drawing_path: electric_drawing_path.map(DocumentPath::new),
        block_no: block,
    }))
}

fn is_active_block_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == ACTIVE_BLOCK_INDEX)
}
