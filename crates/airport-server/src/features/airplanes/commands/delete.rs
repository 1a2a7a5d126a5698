//! Delete airplane command
//!
//! Flights flown by the airplane go with it, and their tickets after them.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::api::response::Deleted;
use crate::db::{AirplaneRepository, DbError};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAirplaneCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteAirplaneError {
    #[error("Airplane '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Deleted, DeleteAirplaneError>> for DeleteAirplaneCommand {}

impl crate::cqrs::Command for DeleteAirplaneCommand {
    const NAME: &'static str = "delete_airplane";
}

impl From<DeleteAirplaneError> for AppError {
    fn from(err: DeleteAirplaneError) -> Self {
        match err {
            DeleteAirplaneError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteAirplaneError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, command: DeleteAirplaneCommand) -> Result<Deleted, DeleteAirplaneError>
where
    R: AirplaneRepository + ?Sized,
{
    repo.delete_airplane(command.id).await.map_err(|e| match e {
        DbError::NotFound(_) => DeleteAirplaneError::NotFound(command.id),
        other => other.into(),
    })?;
    tracing::info!(airplane_id = command.id, "Airplane deleted");
    Ok(Deleted::new(command.id))
}
