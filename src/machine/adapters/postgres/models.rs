//! Diesel row models for machine persistence.

use super::schema::machines;
use diesel::prelude::*;

/// Query result row for machine records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = machines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MachineRow {
    /// Machine identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Free-text status label.
    pub status: String,
    /// Completion flag.
    pub completed: bool,
    /// Optional master-card document path.
    pub master_card_info: Option<String>,
    /// Optional electric-drawing document path.
    pub electric_drawing_path: Option<String>,
    /// Shop-floor machine number.
    pub machine_no: String,
    /// Model designation.
    pub model: String,
    /// Product number.
    pub product_no: String,
    /// Floor block number.
    pub block_no: i32,
}

/// Insert and full-overwrite model for machine records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = machines)]
#[diesel(treat_none_as_null = true)]
pub struct MachineRecord {
    /// Machine identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Free-text status label.
    pub status: String,
    /// Completion flag.
    pub completed: bool,
    /// Optional master-card document path.
    pub master_card_info: Option<String>,
    /// Optional electric-drawing document path.
    pub electric_drawing_path: Option<String>,
    /// Shop-floor machine number.
    pub machine_no: String,
    /// Model designation.
    pub model: String,
    /// Product number.
    pub product_no: String,
    /// Floor block number.
    pub block_no: i32,
}
