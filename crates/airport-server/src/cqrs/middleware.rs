//! Command / query markers and the wrappers that run their handlers
//!
//! Commands change state and are logged at `info` with their outcome.
//! Queries only read and are logged at `debug`.

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

/// Write operation (create, update, delete)
pub trait Command {
    /// Name used in log records
    const NAME: &'static str;
}

/// Read operation (get, list)
pub trait Query {
    /// Name used in log records
    const NAME: &'static str;
}

/// Run a command handler and record its outcome
pub async fn execute_command<C, T, E, Fut>(command: C, handler: impl FnOnce(C) -> Fut) -> Result<T, E>
where
    C: Command,
    E: Display,
    Fut: Future<Output = Result<T, E>>,
{
    let started = Instant::now();
    let result = handler(command).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => tracing::info!(command = C::NAME, elapsed_ms, "Command succeeded"),
        Err(e) => tracing::warn!(command = C::NAME, elapsed_ms, error = %e, "Command failed"),
    }

    result
}

/// Run a query handler and record its outcome
pub async fn execute_query<Q, T, E, Fut>(query: Q, handler: impl FnOnce(Q) -> Fut) -> Result<T, E>
where
    Q: Query,
    E: Display,
    Fut: Future<Output = Result<T, E>>,
{
    let started = Instant::now();
    let result = handler(query).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => tracing::debug!(query = Q::NAME, elapsed_ms, "Query succeeded"),
        Err(e) => tracing::debug!(query = Q::NAME, elapsed_ms, error = %e, "Query failed"),
    }

    result
}
