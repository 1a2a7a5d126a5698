//! Delete route command
//!
//! Flights on the route are deleted with it, and their tickets after them.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::api::response::Deleted;
use crate::db::{DbError, RouteRepository};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRouteCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteRouteError {
    #[error("Route '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Deleted, DeleteRouteError>> for DeleteRouteCommand {}

impl crate::cqrs::Command for DeleteRouteCommand {
    const NAME: &'static str = "delete_route";
}

impl From<DeleteRouteError> for AppError {
    fn from(err: DeleteRouteError) -> Self {
        match err {
            DeleteRouteError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteRouteError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, command: DeleteRouteCommand) -> Result<Deleted, DeleteRouteError>
where
    R: RouteRepository + ?Sized,
{
    repo.delete_route(command.id).await.map_err(|e| match e {
        DbError::NotFound(_) => DeleteRouteError::NotFound(command.id),
        other => other.into(),
    })?;
    tracing::info!(route_id = command.id, "Route deleted");
    Ok(Deleted::new(command.id))
}
