//! Handlers for `/api/machines`.

use super::{
    document::{Disposition, pdf_response},
    error::ApiError,
    multipart::MultipartForm,
    state::AppState,
};
use crate::document::domain::DocumentPath;
use crate::machine::{
    domain::{BlockSlot, Machine, MachineId},
    services::RegisterMachineRequest,
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Response,
};

/// Multipart part carrying a master card on creation.
const CREATE_FILE_PART: &str = "pdf";
const DRAWING_PART: &str = "drawing";
const MASTER_CARD_PART: &str = "mastercard";

pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Machine>>, ApiError> {
    let machines = state
        .machines()
        .list_all()
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(Json(machines))
}

pub async fn list_completed(
    State(state): State<AppState>,
) -> Result<Json<Vec<Machine>>, ApiError> {
    let machines = state
        .machines()
        .list_completed()
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(Json(machines))
}

pub async fn block_map(State(state): State<AppState>) -> Result<Json<Vec<BlockSlot>>, ApiError> {
    let slots = state
        .machines()
        .block_map()
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(Json(slots))
}

/// Returns the machine, or a `null` body when it does not exist.
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<MachineId>,
) -> Result<Json<Option<Machine>>, ApiError> {
    let machine = state
        .machines()
        .find_by_id(id)
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(Json(machine))
}

pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<String, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let master_card = form.take_file(CREATE_FILE_PART);
    let request = register_request(&form);

    let machine = state
        .machines()
        .create(request, master_card)
        .await
        .map_err(|err| state.reject_machine(err))?;
    let stored = machine
        .master_card_info()
        .map_or("no file", DocumentPath::as_str);
    Ok(format!("File uploaded successfully: {stored}"))
}

pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<MachineId>,
) -> Result<Json<Machine>, ApiError> {
    let machine = state
        .machines()
        .mark_complete(id)
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(Json(machine))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<MachineId>,
) -> Result<StatusCode, ApiError> {
    state
        .machines()
        .delete(id)
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(StatusCode::OK)
}

pub async fn upload_drawing(
    State(state): State<AppState>,
    Path(id): Path<MachineId>,
    multipart: Multipart,
) -> Result<String, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let path = state
        .machines()
        .upload_drawing(id, form.take_file(DRAWING_PART))
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(format!("Electric drawing uploaded successfully: {path}"))
}

pub async fn upload_master_card(
    State(state): State<AppState>,
    Path(id): Path<MachineId>,
    multipart: Multipart,
) -> Result<String, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let path = state
        .machines()
        .upload_master_card(id, form.take_file(MASTER_CARD_PART))
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(format!("Master card uploaded successfully: {path}"))
}

pub async fn drawing(
    State(state): State<AppState>,
    Path(id): Path<MachineId>,
) -> Result<Response, ApiError> {
    let document = state
        .machines()
        .drawing(id)
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(pdf_response(document, Disposition::Attachment))
}

pub async fn drawing_inline(
    State(state): State<AppState>,
    Path(id): Path<MachineId>,
) -> Result<Response, ApiError> {
    let document = state
        .machines()
        .drawing(id)
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(pdf_response(document, Disposition::Inline))
}

pub async fn master_card(
    State(state): State<AppState>,
    Path(id): Path<MachineId>,
) -> Result<Response, ApiError> {
    let document = state
        .machines()
        .master_card(id)
        .await
        .map_err(|err| state.reject_machine(err))?;
    Ok(pdf_response(document, Disposition::Inline))
}

/// Builds a registration request from the text parts of a create form.
///
/// `masterCardInfo` is ignored; the stored path comes from the upload.
fn register_request(form: &MultipartForm) -> RegisterMachineRequest {
    let text = |name| form.text(name).unwrap_or_default();
    let block_no = form
        .text("blockNo")
        .and_then(|value| value.trim().parse::<i64>().ok());

    let request = RegisterMachineRequest::new(text("name"), block_no)
        .with_status(text("status"))
        .with_machine_no(text("machineNo"))
        .with_model(text("model"))
        .with_product_no(text("productNo"))
        .with_completed(form.text("completed").is_some_and(parse_flag));
    match form.text("electricDrawingPath") {
        Some(pointer) if !pointer.trim().is_empty() => {
            request.with_electric_drawing_path(pointer)
        }
        _ => request,
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "yes" | "1"
    )
}
