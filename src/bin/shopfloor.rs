//! Runs the shop-floor HTTP server.
//!
//! Usage:
//!
//! ```text
//! shopfloor [--bind ADDR] [--upload-root DIR] [--grid-size N] [--database-url URL]
//! ```
//!
//! Every flag also reads a `SHOPFLOOR_*` environment variable; see
//! `shopfloor --help`. Without a database URL, records are kept in memory
//! and lost on exit. Uploaded documents always live under the upload root.

use clap::Parser;
use mockable::DefaultClock;
use shopfloor::{
    config::ServerConfig,
    document::{adapters::FilesystemDocumentStore, ports::DocumentStore},
    http::{self, AppState},
    machine::{
        adapters::{memory::InMemoryMachineRepository, postgres::PostgresMachineRepository},
        domain::MachineDomainError,
        ports::MachineRepository,
        services::MachineRegistryService,
    },
    persistence::{self, PersistenceSetupError},
    qc_form::{
        adapters::{
            memory::InMemoryQcFormRepository, pdf::PrintPdfReportRenderer,
            postgres::PostgresQcFormRepository,
        },
        ports::{QcFormRepository, QcReportRenderer},
        services::QcFormService,
    },
    telemetry,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
enum ServerError {
    #[error("failed to install logging: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),
    #[error("invalid grid size: {0}")]
    Grid(#[from] MachineDomainError),
    #[error("failed to open upload root: {0}")]
    UploadRoot(#[source] std::io::Error),
    #[error(transparent)]
    Persistence(#[from] PersistenceSetupError),
    #[error("database setup task failed: {0}")]
    SetupTask(#[from] tokio::task::JoinError),
    #[error("server I/O failed: {0}")]
    Serve(#[source] std::io::Error),
}

type Repositories = (Arc<dyn MachineRepository>, Arc<dyn QcFormRepository>);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ServerConfig::parse();
    run(config).await.map_err(Into::into)
}

async fn run(config: ServerConfig) -> Result<(), ServerError> {
    telemetry::init(&config.log_level, config.log_json)?;
    let grid = config.block_grid()?;

    let documents: Arc<dyn DocumentStore> = Arc::new(
        FilesystemDocumentStore::open(&config.upload_root).map_err(ServerError::UploadRoot)?,
    );
    let (machines, qc_forms) = repositories(&config).await?;
    let renderer: Arc<dyn QcReportRenderer> = Arc::new(PrintPdfReportRenderer::new());
    let clock = Arc::new(DefaultClock);

    let state = AppState::new(
        MachineRegistryService::new(machines, Arc::clone(&documents), Arc::clone(&clock), grid),
        QcFormService::new(qc_forms, documents, renderer, clock),
    )
    .with_redacted_storage_errors(config.redact_storage_errors);
    let app = http::router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(ServerError::Serve)?;
    info!(
        bind = %config.bind,
        upload_root = %config.upload_root,
        grid_size = grid.size(),
        "shopfloor listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn repositories(config: &ServerConfig) -> Result<Repositories, ServerError> {
    let Some(database_url) = config.database_url.clone() else {
        info!("no database URL configured; using in-memory stores");
        let machines: Arc<dyn MachineRepository> = Arc::new(InMemoryMachineRepository::new());
        let qc_forms: Arc<dyn QcFormRepository> = Arc::new(InMemoryQcFormRepository::new());
        return Ok((machines, qc_forms));
    };

    let pool_size = config.db_pool_size;
    let pool = tokio::task::spawn_blocking(move || {
        let pool = persistence::connect(&database_url, pool_size)?;
        persistence::apply_schema(&pool)?;
        Ok::<_, PersistenceSetupError>(pool)
    })
    .await??;
    info!("database schema ready");

    let machines: Arc<dyn MachineRepository> =
        Arc::new(PostgresMachineRepository::new(pool.clone()));
    let qc_forms: Arc<dyn QcFormRepository> = Arc::new(PostgresQcFormRepository::new(pool));
    Ok((machines, qc_forms))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
