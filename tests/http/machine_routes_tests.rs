//! Machine routes: placement, completion, uploads, and document fetches.

use super::helpers::{
    AppOptions, BoxError, FailingDocumentStore, Part, TestApp, app, body_bytes, body_json,
    body_text, empty_request, multipart_request,
};
use axum::http::{StatusCode, header};
use rstest::rstest;
use shopfloor::machine::ports::MachineRepository;
use std::sync::Arc;

async fn place(app: &TestApp, name: &str, block: &str) -> Result<String, BoxError> {
    let response = app
        .send(multipart_request(
            "/api/machines",
            &[Part::Text("name", name), Part::Text("blockNo", block)],
        )?)
        .await?;
    if response.status() != StatusCode::OK {
        return Err(format!("placement failed with {}", response.status()).into());
    }
    machine_id_by_name(app, name).await
}

async fn machine_id_by_name(app: &TestApp, name: &str) -> Result<String, BoxError> {
    let listed = body_json(app.send(empty_request("GET", "/api/machines")?).await?).await?;
    listed
        .as_array()
        .into_iter()
        .flatten()
        .find(|machine| machine["name"] == name)
        .and_then(|machine| machine["id"].as_str())
        .map(str::to_owned)
        .ok_or_else(|| format!("machine {name} not listed").into())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn healthz_reports_ok(app: TestApp) -> Result<(), BoxError> {
    let response = app.send(empty_request("GET", "/healthz")?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_file_reports_no_file(app: TestApp) -> Result<(), BoxError> {
    let response = app
        .send(multipart_request(
            "/api/machines",
            &[
                Part::Text("name", "Press"),
                Part::Text("status", "Assembly"),
                Part::Text("machineNo", "M-1"),
                Part::Text("model", "HP-400"),
                Part::Text("productNo", "P-1"),
                Part::Text("completed", "false"),
                Part::Text("masterCardInfo", "ignored.pdf"),
                Part::Text("blockNo", "3"),
            ],
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await?,
        "File uploaded successfully: no file"
    );

    let listed = body_json(app.send(empty_request("GET", "/api/machines")?).await?).await?;
    let machine = &listed[0];
    assert_eq!(machine["name"], "Press");
    assert_eq!(machine["machineNo"], "M-1");
    assert_eq!(machine["blockNo"], 3);
    assert!(machine["masterCardInfo"].is_null());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_master_card_reports_stored_path(app: TestApp) -> Result<(), BoxError> {
    let response = app
        .send(multipart_request(
            "/api/machines",
            &[
                Part::Text("name", "Lathe"),
                Part::Text("blockNo", "4"),
                Part::File("pdf", "card.pdf", b"%PDF card"),
            ],
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await?;
    assert!(text.starts_with("File uploaded successfully: mastercards/"));
    assert!(text.ends_with("_mastercard_card.pdf"));

    let id = machine_id_by_name(&app, "Lathe").await?;
    let card = app
        .send(empty_request("GET", &format!("/api/machines/{id}/mastercard"))?)
        .await?;
    assert_eq!(card.status(), StatusCode::OK);
    assert_eq!(card.headers()[header::CONTENT_TYPE], "application/pdf");
    assert!(
        card.headers()[header::CONTENT_DISPOSITION]
            .to_str()?
            .starts_with("inline")
    );
    assert_eq!(body_bytes(card).await?, b"%PDF card");
    Ok(())
}

#[rstest]
#[case("0")]
#[case("13")]
#[case("")]
#[case("three")]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_invalid_block(app: TestApp, #[case] block: &str) -> Result<(), BoxError> {
    let response = app
        .send(multipart_request(
            "/api/machines",
            &[Part::Text("name", "Drill"), Part::Text("blockNo", block)],
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await?,
        "Block number must be between 1 and 12."
    );
    assert!(app.machines.list_all().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn block_is_reusable_after_completion(app: TestApp) -> Result<(), BoxError> {
    let first = place(&app, "A", "3").await?;

    let conflict = app
        .send(multipart_request(
            "/api/machines",
            &[Part::Text("name", "B"), Part::Text("blockNo", "3")],
        )?)
        .await?;
    assert_eq!(conflict.status(), StatusCode::CONFLICT);
    assert_eq!(body_text(conflict).await?, "Block number 3 already occupied.");

    let completed = app
        .send(empty_request("POST", &format!("/api/machines/{first}/complete"))?)
        .await?;
    assert_eq!(completed.status(), StatusCode::OK);
    let completed = body_json(completed).await?;
    assert_eq!(completed["completed"], true);
    assert_eq!(completed["status"], "COMPLETE");
    assert_eq!(completed["blockNo"], 3);

    place(&app, "B", "3").await?;

    let done = body_json(
        app.send(empty_request("GET", "/api/machines/completed")?)
            .await?,
    )
    .await?;
    assert_eq!(done.as_array().map(Vec::len), Some(1));
    assert_eq!(done[0]["name"], "A");

    let blocks = body_json(app.send(empty_request("GET", "/api/machines/blocks")?).await?).await?;
    assert_eq!(blocks.as_array().map(Vec::len), Some(12));
    assert_eq!(blocks[2]["blockNo"], 3);
    assert_eq!(blocks[2]["machine"]["name"], "B");
    assert!(blocks[0]["machine"].is_null());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_machine_lookups(app: TestApp) -> Result<(), BoxError> {
    let missing = uuid::Uuid::new_v4();

    let found = app
        .send(empty_request("GET", &format!("/api/machines/{missing}"))?)
        .await?;
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(body_text(found).await?, "null");

    let completed = app
        .send(empty_request("POST", &format!("/api/machines/{missing}/complete"))?)
        .await?;
    assert_eq!(completed.status(), StatusCode::NOT_FOUND);

    let drawing = app
        .send(empty_request("GET", &format!("/api/machines/{missing}/drawing"))?)
        .await?;
    assert_eq!(drawing.status(), StatusCode::NOT_FOUND);

    let deleted = app
        .send(empty_request("DELETE", &format!("/api/machines/{missing}"))?)
        .await?;
    assert_eq!(deleted.status(), StatusCode::OK);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drawing_upload_round_trips_inline(app: TestApp) -> Result<(), BoxError> {
    let id = place(&app, "Press", "5").await?;
    let drawing = b"%PDF-1.7 wiring diagram".as_slice();

    let upload = app
        .send(multipart_request(
            &format!("/api/machines/{id}/drawing"),
            &[Part::File("drawing", "wiring.pdf", drawing)],
        )?)
        .await?;
    assert_eq!(upload.status(), StatusCode::OK);
    let message = body_text(upload).await?;
    assert!(message.starts_with("Electric drawing uploaded successfully: drawings/"));

    let inline = app
        .send(empty_request("GET", &format!("/api/machines/{id}/drawingpdf"))?)
        .await?;
    assert_eq!(inline.status(), StatusCode::OK);
    assert_eq!(inline.headers()[header::CONTENT_TYPE], "application/pdf");
    let disposition = inline.headers()[header::CONTENT_DISPOSITION].to_str()?.to_owned();
    assert!(disposition.starts_with("inline; filename=\""));
    assert!(disposition.ends_with("_drawing_wiring.pdf\""));
    assert_eq!(body_bytes(inline).await?, drawing);

    let attachment = app
        .send(empty_request("GET", &format!("/api/machines/{id}/drawing"))?)
        .await?;
    assert_eq!(attachment.status(), StatusCode::OK);
    assert_eq!(attachment.headers()[header::CONTENT_TYPE], "application/pdf");
    let attachment_disposition = attachment.headers()[header::CONTENT_DISPOSITION]
        .to_str()?
        .to_owned();
    assert!(attachment_disposition.starts_with("attachment; filename=\""));
    assert!(attachment_disposition.ends_with("_drawing_wiring.pdf\""));
    assert_eq!(body_bytes(attachment).await?, drawing);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_without_file_part_is_rejected(app: TestApp) -> Result<(), BoxError> {
    let id = place(&app, "Press", "6").await?;

    let drawing = app
        .send(multipart_request(
            &format!("/api/machines/{id}/drawing"),
            &[Part::Text("note", "forgot the file")],
        )?)
        .await?;
    assert_eq!(drawing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(drawing).await?, "No drawing file uploaded");

    let card = app
        .send(multipart_request(
            &format!("/api/machines/{id}/mastercard"),
            &[Part::File("mastercard", "empty.pdf", b"")],
        )?)
        .await?;
    assert_eq!(card.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(card).await?, "No master card file uploaded");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn master_card_upload_reports_path(app: TestApp) -> Result<(), BoxError> {
    let id = place(&app, "Press", "7").await?;

    let response = app
        .send(multipart_request(
            &format!("/api/machines/{id}/mastercard"),
            &[Part::File("mastercard", "card.pdf", b"%PDF card")],
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let message = body_text(response).await?;
    assert!(message.starts_with("Master card uploaded successfully: mastercards/"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_machine_from_listing(app: TestApp) -> Result<(), BoxError> {
    let id = place(&app, "Press", "8").await?;

    let deleted = app
        .send(empty_request("DELETE", &format!("/api/machines/{id}"))?)
        .await?;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert!(body_bytes(deleted).await?.is_empty());

    let listed = body_json(app.send(empty_request("GET", "/api/machines")?).await?).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
    Ok(())
}

#[rstest]
#[case(false, "Upload failed: disk quota exceeded")]
#[case(true, "Upload failed: internal storage error")]
#[tokio::test(flavor = "multi_thread")]
async fn storage_failures_surface_as_server_errors(
    #[case] redact: bool,
    #[case] expected: &str,
) -> Result<(), BoxError> {
    let app = TestApp::build(AppOptions {
        documents: Arc::new(FailingDocumentStore),
        redact_storage_errors: redact,
        ..AppOptions::default()
    });

    let response = app
        .send(multipart_request(
            "/api/machines",
            &[
                Part::Text("name", "Press"),
                Part::Text("blockNo", "2"),
                Part::File("pdf", "card.pdf", b"%PDF"),
            ],
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await?, expected);
    assert!(app.machines.list_all().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_machine_id_is_rejected(app: TestApp) -> Result<(), BoxError> {
    let response = app
        .send(empty_request("GET", "/api/machines/not-a-uuid/drawing")?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
