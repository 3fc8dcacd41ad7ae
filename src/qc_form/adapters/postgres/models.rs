//! Diesel row models for QC form persistence.

use super::schema::qc_forms;
use diesel::prelude::*;

/// Query result row and full-overwrite model for QC forms.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = qc_forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct QcFormRow {
    /// Form identifier.
    pub id: uuid::Uuid,
    /// Referenced machine identifier.
    pub machine_id: uuid::Uuid,
    /// Inspector name.
    pub inspector_name: Option<String>,
    /// Inspection outcome label.
    pub status: Option<String>,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// Path of the generated report.
    pub pdf_path: Option<String>,
}
