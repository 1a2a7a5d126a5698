//! Delete airport command
//!
//! Routes touching the airport are removed with it, and their flights and
//! tickets after them.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::api::response::Deleted;
use crate::db::{AirportRepository, DbError};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAirportCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteAirportError {
    #[error("Airport '{0}' not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Deleted, DeleteAirportError>> for DeleteAirportCommand {}

impl crate::cqrs::Command for DeleteAirportCommand {
    const NAME: &'static str = "delete_airport";
}

impl From<DeleteAirportError> for AppError {
    fn from(err: DeleteAirportError) -> Self {
        match err {
            DeleteAirportError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteAirportError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, command: DeleteAirportCommand) -> Result<Deleted, DeleteAirportError>
where
    R: AirportRepository + ?Sized,
{
    repo.delete_airport(command.id).await.map_err(|e| match e {
        DbError::NotFound(_) => DeleteAirportError::NotFound(command.id),
        other => other.into(),
    })?;

    tracing::info!(airport_id = command.id, "Airport deleted");
    Ok(Deleted::new(command.id))
}
