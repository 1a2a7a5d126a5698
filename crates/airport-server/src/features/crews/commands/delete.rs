//! Delete crew command
//!
//! The member is dropped from every flight crew; flights themselves stay.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::api::response::Deleted;
use crate::db::{CrewRepository, DbError};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCrewCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteCrewError {
    #[error("Crew member '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Deleted, DeleteCrewError>> for DeleteCrewCommand {}

impl crate::cqrs::Command for DeleteCrewCommand {
    const NAME: &'static str = "delete_crew";
}

impl From<DeleteCrewError> for AppError {
    fn from(err: DeleteCrewError) -> Self {
        match err {
            DeleteCrewError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteCrewError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, command: DeleteCrewCommand) -> Result<Deleted, DeleteCrewError>
where
    R: CrewRepository + ?Sized,
{
    repo.delete_crew(command.id).await.map_err(|e| match e {
        DbError::NotFound(_) => DeleteCrewError::NotFound(command.id),
        other => other.into(),
    })?;
    tracing::info!(crew_id = command.id, "Crew member deleted");
    Ok(Deleted::new(command.id))
}
