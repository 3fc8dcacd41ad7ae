//! Shared `PostgreSQL` plumbing for repository adapters.
//!
//! Adapters receive a [`PgPool`] built by [`connect`]. The schema is kept as
//! plain SQL migrations under `migrations/` and applied idempotently at
//! startup by [`apply_schema`].

mod blocking;

pub(crate) use blocking::run_blocking_with;

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema migrations in application order.
pub const SCHEMA_MIGRATIONS: [&str; 2] = [
    include_str!("../../migrations/2026-10-19-000000_create_machines/up.sql"),
    include_str!("../../migrations/2026-10-19-000001_create_qc_forms/up.sql"),
];

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum PersistenceSetupError {
    /// The connection pool could not be built or a connection obtained.
    #[error("database connection failed: {0}")]
    Pool(#[from] PoolError),

    /// A schema migration failed.
    #[error("schema migration failed: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PersistenceSetupError::Pool`] when the pool cannot establish its
/// initial connections.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, PersistenceSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

/// Applies every schema migration. Migrations use `IF NOT EXISTS`, so this
/// is safe to run on each startup.
///
/// This is a blocking call.
///
/// # Errors
///
/// Returns [`PersistenceSetupError`] when no connection is available or a
/// migration fails.
pub fn apply_schema(pool: &PgPool) -> Result<(), PersistenceSetupError> {
    let mut connection = pool.get()?;
    for migration in SCHEMA_MIGRATIONS {
        connection.batch_execute(migration)?;
    }
    Ok(())
}
