//! Application services for QC forms.

mod forms;

pub use forms::{CreateQcFormRequest, QcFormService, QcFormServiceError, QcFormServiceResult};
