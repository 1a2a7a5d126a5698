//! Delete flight command
//!
//! Tickets for the flight are deleted with it.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::api::response::Deleted;
use crate::db::{DbError, FlightRepository};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFlightCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteFlightError {
    #[error("Flight '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Deleted, DeleteFlightError>> for DeleteFlightCommand {}

impl crate::cqrs::Command for DeleteFlightCommand {
    const NAME: &'static str = "delete_flight";
}

impl From<DeleteFlightError> for AppError {
    fn from(err: DeleteFlightError) -> Self {
        match err {
            DeleteFlightError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteFlightError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, command: DeleteFlightCommand) -> Result<Deleted, DeleteFlightError>
where
    R: FlightRepository + ?Sized,
{
    repo.delete_flight(command.id).await.map_err(|e| match e {
        DbError::NotFound(_) => DeleteFlightError::NotFound(command.id),
        other => other.into(),
    })?;
    tracing::info!(flight_id = command.id, "Flight deleted");
    Ok(Deleted::new(command.id))
}
