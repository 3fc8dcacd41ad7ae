//! Server configuration from command-line flags and `SHOPFLOOR_*`
//! environment variables.

use crate::machine::domain::{BlockGrid, MachineDomainError};
use camino::Utf8PathBuf;
use clap::Parser;
use std::net::SocketAddr;

/// Default request body limit: 25 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Runtime settings for the `shopfloor` server.
#[derive(Debug, Clone, Parser)]
#[command(name = "shopfloor", version, about = "Shop-floor machine registry server")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "SHOPFLOOR_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Directory under which uploaded and generated documents are stored.
    #[arg(long, env = "SHOPFLOOR_UPLOAD_ROOT", default_value = "uploads")]
    pub upload_root: Utf8PathBuf,

    /// Number of floor blocks; valid block numbers are `1..=grid_size`.
    #[arg(long, env = "SHOPFLOOR_GRID_SIZE", default_value_t = BlockGrid::DEFAULT_SIZE)]
    pub grid_size: u16,

    /// `PostgreSQL` connection URL. In-memory stores are used when absent.
    #[arg(long, env = "SHOPFLOOR_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum connections in the database pool.
    #[arg(long, env = "SHOPFLOOR_DB_POOL_SIZE", default_value_t = 8)]
    pub db_pool_size: u32,

    /// Largest accepted request body, in bytes.
    #[arg(long, env = "SHOPFLOOR_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Report storage failures with a generic message instead of the
    /// underlying error text.
    #[arg(long, env = "SHOPFLOOR_REDACT_STORAGE_ERRORS")]
    pub redact_storage_errors: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "SHOPFLOOR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, env = "SHOPFLOOR_LOG_JSON")]
    pub log_json: bool,
}

impl ServerConfig {
    /// Returns the validated floor grid.
    ///
    /// # Errors
    ///
    /// Returns [`MachineDomainError::EmptyBlockGrid`] when `grid_size` is 0.
    pub const fn block_grid(&self) -> Result<BlockGrid, MachineDomainError> {
        BlockGrid::new(self.grid_size)
    }
}
