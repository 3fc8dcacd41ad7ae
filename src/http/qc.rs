//! Handlers for `/api/qc`.

use super::{
    document::{Disposition, pdf_response},
    error::ApiError,
    state::AppState,
};
use crate::machine::domain::MachineId;
use crate::qc_form::{
    domain::{QcForm, QcFormId, QcInspection},
    services::CreateQcFormRequest,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineFilter {
    machine_id: MachineId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQcFormBody {
    machine_id: MachineId,
    #[serde(flatten)]
    inspection: QcInspection,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<MachineFilter>,
) -> Result<Json<Vec<QcForm>>, ApiError> {
    let forms = state
        .qc_forms()
        .list_for_machine(filter.machine_id)
        .await
        .map_err(|err| state.reject_qc(err))?;
    Ok(Json(forms))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateQcFormBody>,
) -> Result<(StatusCode, Json<QcForm>), ApiError> {
    let request = CreateQcFormRequest::new(body.machine_id).with_inspection(body.inspection);
    let form = state
        .qc_forms()
        .create(request)
        .await
        .map_err(|err| state.reject_qc(err))?;
    Ok((StatusCode::CREATED, Json(form)))
}

pub async fn report_inline(
    State(state): State<AppState>,
    Path(id): Path<QcFormId>,
) -> Result<Response, ApiError> {
    report(&state, id, Disposition::Inline).await
}

pub async fn report_download(
    State(state): State<AppState>,
    Path(id): Path<QcFormId>,
) -> Result<Response, ApiError> {
    report(&state, id, Disposition::Attachment).await
}

async fn report(
    state: &AppState,
    id: QcFormId,
    disposition: Disposition,
) -> Result<Response, ApiError> {
    let document = state
        .qc_forms()
        .report(id)
        .await
        .map_err(|err| state.reject_qc(err))?;
    Ok(pdf_response(document, disposition))
}
