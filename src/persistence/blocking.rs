//! Blocking operation helpers for `PostgreSQL` repositories.
//!
//! Diesel is synchronous, so every query is offloaded to tokio's blocking
//! pool instead of running on executor worker threads.

use super::PgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::PoolError;
use thiserror::Error;

/// Infrastructure failure around a blocking database call.
#[derive(Debug, Error)]
pub(crate) enum BlockingFailure {
    /// No pooled connection could be obtained.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Runs `f` with a pooled connection on the blocking thread pool.
///
/// Pool and join failures are converted with `map_err`; errors returned by
/// `f` pass through unchanged.
pub(crate) async fn run_blocking_with<F, T, E, M>(pool: &PgPool, f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: Fn(BlockingFailure) -> E + Copy + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool
            .get()
            .map_err(|err| map_err(BlockingFailure::from(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| map_err(BlockingFailure::from(err)))?
}
