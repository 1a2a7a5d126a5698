use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RouteRepository};
use crate::error::AppError;
use crate::features::air_routes::types::RouteWriteResponse;
use crate::features::shared::validation::{validate_non_negative, FieldError};
use crate::models::NewRoute;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRouteCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateRouteError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Route '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<RouteWriteResponse, UpdateRouteError>> for UpdateRouteCommand {}

impl crate::cqrs::Command for UpdateRouteCommand {
    const NAME: &'static str = "update_route";
}

impl From<UpdateRouteError> for AppError {
    fn from(err: UpdateRouteError) -> Self {
        match err {
            UpdateRouteError::Validation(e) => e.into(),
            UpdateRouteError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateRouteError::Database(e) => e.into(),
        }
    }
}

impl UpdateRouteCommand {
    pub fn validate(&self) -> Result<(), UpdateRouteError> {
        if self.source.is_none() && self.destination.is_none() && self.distance.is_none() {
            return Err(FieldError::new(
                "non_field_errors",
                "At least one field must be provided for update",
            )
            .into());
        }
        if let Some(distance) = self.distance {
            validate_non_negative("distance", distance)?;
        }
        Ok(())
    }
}

#[tracing::instrument(skip(repo, command), fields(route_id = command.id))]
pub async fn handle<R>(
    repo: &R,
    command: UpdateRouteCommand,
) -> Result<RouteWriteResponse, UpdateRouteError>
where
    R: RouteRepository + ?Sized,
{
    command.validate()?;

    let current = repo
        .get_route(command.id)
        .await?
        .ok_or(UpdateRouteError::NotFound(command.id))?
        .route;

    let updated = repo
        .update_route(
            command.id,
            NewRoute {
                source_id: command.source.unwrap_or(current.source_id),
                destination_id: command.destination.unwrap_or(current.destination_id),
                distance: command.distance.unwrap_or(current.distance),
            },
        )
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => UpdateRouteError::NotFound(command.id),
            other => other.into(),
        })?;

    Ok(updated.into())
}
