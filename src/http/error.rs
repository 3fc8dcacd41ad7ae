//! HTTP error taxonomy and its mapping from service errors.

use crate::machine::services::MachineRegistryError;
use crate::qc_form::services::QcFormServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

const REDACTED_DETAIL: &str = "internal storage error";

/// Errors returned to HTTP clients as `text/plain` bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request was malformed or failed validation.
    #[error("{0}")]
    Validation(String),

    /// The addressed record or document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request conflicts with current state.
    #[error("{0}")]
    Conflict(String),

    /// Persistence or filesystem failure.
    #[error("Upload failed: {0}")]
    Storage(String),
}

impl ApiError {
    /// Returns the status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps a machine registry error onto the HTTP taxonomy.
    #[must_use]
    pub fn from_machine_error(err: MachineRegistryError, redact: bool) -> Self {
        match err {
            MachineRegistryError::Domain(_) | MachineRegistryError::MissingUpload(_) => {
                Self::Validation(err.to_string())
            }
            MachineRegistryError::BlockOccupied(_) => Self::Conflict(err.to_string()),
            MachineRegistryError::NotFound(_) | MachineRegistryError::DocumentNotAttached { .. } => {
                Self::NotFound(err.to_string())
            }
            MachineRegistryError::Document(ref document) if document.is_not_found() => {
                Self::NotFound(err.to_string())
            }
            MachineRegistryError::Document(_) | MachineRegistryError::Repository(_) => {
                Self::storage(&err, redact)
            }
        }
    }

    /// Maps a QC form service error onto the HTTP taxonomy.
    #[must_use]
    pub fn from_qc_error(err: QcFormServiceError, redact: bool) -> Self {
        match err {
            QcFormServiceError::NotFound(_) | QcFormServiceError::ReportMissing(_) => {
                Self::NotFound(err.to_string())
            }
            QcFormServiceError::Document(ref document) if document.is_not_found() => {
                Self::NotFound(err.to_string())
            }
            QcFormServiceError::Render(_)
            | QcFormServiceError::Document(_)
            | QcFormServiceError::Repository(_) => Self::storage(&err, redact),
        }
    }

    fn storage(err: &dyn std::error::Error, redact: bool) -> Self {
        error!(error = %err, "storage failure");
        if redact {
            Self::Storage(REDACTED_DETAIL.to_owned())
        } else {
            Self::Storage(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
