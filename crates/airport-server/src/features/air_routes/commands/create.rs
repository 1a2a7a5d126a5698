use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RouteRepository};
use crate::error::AppError;
use crate::features::air_routes::types::RouteWriteResponse;
use crate::features::shared::validation::{validate_non_negative, FieldError};
use crate::models::NewRoute;

/// Command to create a route between two airports
///
/// ```json
/// { "source": 1, "destination": 2, "distance": 540 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRouteCommand {
    /// Source airport id
    pub source: i64,
    /// Destination airport id
    pub destination: i64,
    pub distance: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateRouteError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<RouteWriteResponse, CreateRouteError>> for CreateRouteCommand {}

impl crate::cqrs::Command for CreateRouteCommand {
    const NAME: &'static str = "create_route";
}

impl From<CreateRouteError> for AppError {
    fn from(err: CreateRouteError) -> Self {
        match err {
            CreateRouteError::Validation(e) => e.into(),
            CreateRouteError::Database(e) => e.into(),
        }
    }
}

impl CreateRouteCommand {
    pub fn validate(&self) -> Result<(), CreateRouteError> {
        validate_non_negative("distance", self.distance)?;
        Ok(())
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(
    repo: &R,
    command: CreateRouteCommand,
) -> Result<RouteWriteResponse, CreateRouteError>
where
    R: RouteRepository + ?Sized,
{
    command.validate()?;
    let route = repo
        .insert_route(NewRoute {
            source_id: command.source,
            destination_id: command.destination,
            distance: command.distance,
        })
        .await?;
    tracing::info!(route_id = route.id, "Route created");
    Ok(route.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{AirportRepository, MemoryRepository};
    use crate::models::NewAirport;

    #[test]
    fn test_negative_distance_rejected() {
        let cmd = CreateRouteCommand {
            source: 1,
            destination: 2,
            distance: -1,
        };
        match cmd.validate() {
            Err(CreateRouteError::Validation(e)) => assert_eq!(e.field, "distance"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_airport_is_invalid_reference() {
        let repo = MemoryRepository::new();
        let kyiv = repo
            .insert_airport(NewAirport {
                name: "Boryspil".to_string(),
                closest_big_city: "Kyiv".to_string(),
            })
            .await
            .unwrap();

        let result = handle(
            &repo,
            CreateRouteCommand {
                source: kyiv.id,
                destination: 99,
                distance: 470,
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(CreateRouteError::Database(DbError::InvalidReference { id: 99, .. }))
        ));
    }
}
