//! Shared helpers for `PostgreSQL` adapter tests.
//!
//! Tests run only when `SHOPFLOOR_TEST_DATABASE_URL` names a reachable
//! database. Each test gets a single-connection pool whose connection runs
//! inside a test transaction that is never committed.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, TestCustomizer};
use shopfloor::persistence::{PgPool, SCHEMA_MIGRATIONS};

/// Environment variable naming the test database.
pub const DATABASE_URL_ENV: &str = "SHOPFLOOR_TEST_DATABASE_URL";

/// Boxed error type for fallible test helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Returns a rolled-back test pool, or `None` when no database is configured.
///
/// The schema is applied and committed on a separate connection first, so
/// concurrent tests never race on table creation inside their transactions.
///
/// # Errors
///
/// Returns an error when the database is configured but unreachable or the
/// schema cannot be applied.
pub fn test_pool() -> Result<Option<PgPool>, BoxError> {
    let Ok(database_url) = std::env::var(DATABASE_URL_ENV) else {
        return Ok(None);
    };

    let mut setup = PgConnection::establish(&database_url)?;
    for migration in SCHEMA_MIGRATIONS {
        setup.batch_execute(migration)?;
    }

    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(TestCustomizer))
        .build(ConnectionManager::<PgConnection>::new(database_url))?;
    Ok(Some(pool))
}
