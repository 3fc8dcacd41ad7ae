//! HTTP surface: an `axum` router mounting the machine and QC handlers
//! under `/api`.
//!
//! Errors are returned as `text/plain` bodies with the status chosen by
//! [`ApiError`].

mod document;
mod error;
mod machines;
mod multipart;
mod qc;
mod state;

pub use error::ApiError;
pub use state::{AppState, MachineRegistry, QcForms};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
};

/// Builds the application router.
///
/// Request bodies larger than `max_upload_bytes` are rejected.
#[must_use]
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let api = Router::new()
        .route("/machines", get(machines::list_all).post(machines::create))
        .route("/machines/completed", get(machines::list_completed))
        .route("/machines/blocks", get(machines::block_map))
        .route("/machines/{id}", get(machines::find).delete(machines::delete))
        .route("/machines/{id}/complete", post(machines::complete))
        .route(
            "/machines/{id}/drawing",
            get(machines::drawing).post(machines::upload_drawing),
        )
        .route("/machines/{id}/drawingpdf", get(machines::drawing_inline))
        .route(
            "/machines/{id}/mastercard",
            get(machines::master_card).post(machines::upload_master_card),
        )
        .route("/qc", get(qc::list).post(qc::create))
        .route("/qc/{id}/pdf", get(qc::report_inline))
        .route("/qc/{id}/pdf/download", get(qc::report_download));

    Router::new()
        .nest("/api", api)
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
