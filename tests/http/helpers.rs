//! Router construction and request helpers for HTTP tests.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use mockable::DefaultClock;
use rstest::fixture;
use shopfloor::{
    document::{
        adapters::InMemoryDocumentStore,
        domain::DocumentPath,
        ports::{DocumentStore, DocumentStoreError, DocumentStoreResult},
    },
    http::{AppState, router},
    machine::{
        adapters::memory::InMemoryMachineRepository, domain::BlockGrid, ports::MachineRepository,
        services::MachineRegistryService,
    },
    qc_form::{
        adapters::{memory::InMemoryQcFormRepository, pdf::PrintPdfReportRenderer},
        domain::QcReport,
        ports::{QcFormRepository, QcReportRenderer, RenderError},
        services::QcFormService,
    },
};
use std::sync::Arc;
use tower::ServiceExt;

/// Request body limit used by test routers.
pub const TEST_BODY_LIMIT: usize = 1024 * 1024;

const BOUNDARY: &str = "shopfloor-test-boundary";

/// Boxed error type for fallible test helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A router over in-memory adapters, with handles to inspect its stores.
pub struct TestApp {
    pub router: Router,
    pub machines: Arc<InMemoryMachineRepository>,
    pub qc_forms: Arc<InMemoryQcFormRepository>,
}

/// Options for assembling a [`TestApp`].
pub struct AppOptions {
    pub documents: Arc<dyn DocumentStore>,
    pub renderer: Arc<dyn QcReportRenderer>,
    pub redact_storage_errors: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            documents: Arc::new(InMemoryDocumentStore::new()),
            renderer: Arc::new(PrintPdfReportRenderer::new()),
            redact_storage_errors: false,
        }
    }
}

impl TestApp {
    /// Builds a router over fresh in-memory repositories.
    #[must_use]
    pub fn build(options: AppOptions) -> Self {
        let machines = Arc::new(InMemoryMachineRepository::new());
        let qc_forms = Arc::new(InMemoryQcFormRepository::new());
        let machine_port: Arc<dyn MachineRepository> = machines.clone();
        let qc_port: Arc<dyn QcFormRepository> = qc_forms.clone();
        let clock = Arc::new(DefaultClock);

        let state = AppState::new(
            MachineRegistryService::new(
                machine_port,
                Arc::clone(&options.documents),
                Arc::clone(&clock),
                BlockGrid::default(),
            ),
            QcFormService::new(qc_port, options.documents, options.renderer, clock),
        )
        .with_redacted_storage_errors(options.redact_storage_errors);

        Self {
            router: router(state, TEST_BODY_LIMIT),
            machines,
            qc_forms,
        }
    }

    /// Sends `request` through the router.
    ///
    /// # Errors
    ///
    /// Returns an error when the router fails to produce a response.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>, BoxError> {
        Ok(self.router.clone().oneshot(request).await?)
    }
}

/// Fixture providing a router with default in-memory adapters.
#[fixture]
pub fn app() -> TestApp {
    TestApp::build(AppOptions::default())
}

/// One part of a multipart request.
pub enum Part<'a> {
    /// A plain text field.
    Text(&'a str, &'a str),
    /// A file field with a client-side file name.
    File(&'a str, &'a str, &'a [u8]),
}

/// Builds a `multipart/form-data` request.
///
/// # Errors
///
/// Returns an error when the request cannot be assembled.
pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Result<Request<Body>, BoxError> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, contents) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; \
                         filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(contents);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Ok(Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))?)
}

/// Builds a JSON `POST` request.
///
/// # Errors
///
/// Returns an error when the request cannot be assembled.
pub fn json_request(uri: &str, body: &serde_json::Value) -> Result<Request<Body>, BoxError> {
    Ok(Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

/// Builds a bodiless request.
///
/// # Errors
///
/// Returns an error when the request cannot be assembled.
pub fn empty_request(method: &str, uri: &str) -> Result<Request<Body>, BoxError> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())?)
}

/// Collects a response body.
///
/// # Errors
///
/// Returns an error when the body cannot be read.
pub async fn body_bytes(response: Response<Body>) -> Result<Vec<u8>, BoxError> {
    Ok(response.into_body().collect().await?.to_bytes().to_vec())
}

/// Collects a response body as UTF-8 text.
///
/// # Errors
///
/// Returns an error when the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response<Body>) -> Result<String, BoxError> {
    Ok(String::from_utf8(body_bytes(response).await?)?)
}

/// Collects a response body as JSON.
///
/// # Errors
///
/// Returns an error when the body cannot be read or parsed.
pub async fn body_json(response: Response<Body>) -> Result<serde_json::Value, BoxError> {
    Ok(serde_json::from_slice(&body_bytes(response).await?)?)
}

/// Document store whose every operation fails.
pub struct FailingDocumentStore;

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn save(&self, _path: &DocumentPath, _contents: Vec<u8>) -> DocumentStoreResult<()> {
        Err(DocumentStoreError::persistence(std::io::Error::other(
            "disk quota exceeded",
        )))
    }

    async fn read(&self, _path: &DocumentPath) -> DocumentStoreResult<Vec<u8>> {
        Err(DocumentStoreError::persistence(std::io::Error::other(
            "disk quota exceeded",
        )))
    }
}

/// Renderer whose every call fails.
pub struct FailingRenderer;

impl QcReportRenderer for FailingRenderer {
    fn render(&self, _report: &QcReport) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::pdf(std::io::Error::other("renderer offline")))
    }
}
