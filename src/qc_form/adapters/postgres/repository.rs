//! `PostgreSQL` repository implementation for QC form storage.

use super::{models::QcFormRow, schema::qc_forms};
use crate::document::domain::DocumentPath;
use crate::machine::domain::MachineId;
use crate::persistence::{PgPool, run_blocking_with};
use crate::qc_form::{
    domain::{QcForm, QcFormId, QcInspection},
    ports::{QcFormRepository, QcFormRepositoryError, QcFormRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed QC form repository.
#[derive(Debug, Clone)]
pub struct PostgresQcFormRepository {
    pool: PgPool,
}

impl PostgresQcFormRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> QcFormRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> QcFormRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        run_blocking_with(&self.pool, f, QcFormRepositoryError::persistence).await
    }
}

#[async_trait]
impl QcFormRepository for PostgresQcFormRepository {
    async fn store(&self, form: &QcForm) -> QcFormRepositoryResult<()> {
        let form_id = form.id();
        let row = to_row(form);

        self.run_blocking(move |connection| {
            diesel::insert_into(qc_forms::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        QcFormRepositoryError::DuplicateForm(form_id)
                    }
                    _ => QcFormRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, form: &QcForm) -> QcFormRepositoryResult<()> {
        let form_id = form.id();
        let row = to_row(form);

        self.run_blocking(move |connection| {
            let updated = diesel::update(qc_forms::table.find(form_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(QcFormRepositoryError::persistence)?;
            if updated == 0 {
                return Err(QcFormRepositoryError::NotFound(form_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: QcFormId) -> QcFormRepositoryResult<Option<QcForm>> {
        self.run_blocking(move |connection| {
            let row = qc_forms::table
                .find(id.into_inner())
                .select(QcFormRow::as_select())
                .first::<QcFormRow>(connection)
                .optional()
                .map_err(QcFormRepositoryError::persistence)?;
            Ok(row.map(row_to_form))
        })
        .await
    }

    async fn list_all(&self) -> QcFormRepositoryResult<Vec<QcForm>> {
        self.run_blocking(move |connection| {
            let rows = qc_forms::table
                .select(QcFormRow::as_select())
                .load::<QcFormRow>(connection)
                .map_err(QcFormRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_form).collect())
        })
        .await
    }

    async fn find_by_machine_id(
        &self,
        machine_id: MachineId,
    ) -> QcFormRepositoryResult<Vec<QcForm>> {
        self.run_blocking(move |connection| {
            let rows = qc_forms::table
                .filter(qc_forms::machine_id.eq(machine_id.into_inner()))
                .select(QcFormRow::as_select())
                .load::<QcFormRow>(connection)
                .map_err(QcFormRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_form).collect())
        })
        .await
    }

    async fn delete(&self, id: QcFormId) -> QcFormRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(qc_forms::table.find(id.into_inner()))
                .execute(connection)
                .map_err(QcFormRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn to_row(form: &QcForm) -> QcFormRow {
    let inspection = form.inspection().clone();
    QcFormRow {
        id: form.id().into_inner(),
        machine_id: form.machine_id().into_inner(),
        inspector_name: inspection.inspector_name,
        status: inspection.status,
        remarks: inspection.remarks,
        pdf_path: form.pdf_path().map(|path| path.as_str().to_owned()),
    }
}

fn row_to_form(row: QcFormRow) -> QcForm {
    let QcFormRow {
        id,
        machine_id,
        inspector_name,
        status,
        remarks,
        pdf_path,
    } = row;

    QcForm::from_persisted(
        QcFormId::from_uuid(id),
        MachineId::from_uuid(machine_id),
        QcInspection {
            inspector_name,
            status,
            remarks,
        },
        pdf_path.map(DocumentPath::new),
    )
}
