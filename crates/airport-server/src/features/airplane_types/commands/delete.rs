//! Delete airplane type command
//!
//! Airplanes of the type go with it, and their flights after them.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::api::response::Deleted;
use crate::db::{AirplaneTypeRepository, DbError};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAirplaneTypeCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteAirplaneTypeError {
    #[error("Airplane type '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Deleted, DeleteAirplaneTypeError>> for DeleteAirplaneTypeCommand {}

impl crate::cqrs::Command for DeleteAirplaneTypeCommand {
    const NAME: &'static str = "delete_airplane_type";
}

impl From<DeleteAirplaneTypeError> for AppError {
    fn from(err: DeleteAirplaneTypeError) -> Self {
        match err {
            DeleteAirplaneTypeError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteAirplaneTypeError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(
    repo: &R,
    command: DeleteAirplaneTypeCommand,
) -> Result<Deleted, DeleteAirplaneTypeError>
where
    R: AirplaneTypeRepository + ?Sized,
{
    repo.delete_airplane_type(command.id)
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => DeleteAirplaneTypeError::NotFound(command.id),
            other => other.into(),
        })?;
    tracing::info!(airplane_type_id = command.id, "Airplane type deleted");
    Ok(Deleted::new(command.id))
}
