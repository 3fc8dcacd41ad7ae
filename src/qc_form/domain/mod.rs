//! Domain model for QC inspection forms and their printable reports.

mod form;
mod ids;
mod report;

pub use form::{QcForm, QcInspection};
pub use ids::QcFormId;
pub use report::{QcReport, REPORT_TITLE, ReportField};
