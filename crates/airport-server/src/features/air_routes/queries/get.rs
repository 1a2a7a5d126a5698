use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RouteRepository};
use crate::error::AppError;
use crate::features::air_routes::types::RouteDetailResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRouteQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetRouteError {
    #[error("Route '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<RouteDetailResponse, GetRouteError>> for GetRouteQuery {}

impl crate::cqrs::Query for GetRouteQuery {
    const NAME: &'static str = "get_route";
}

impl From<GetRouteError> for AppError {
    fn from(err: GetRouteError) -> Self {
        match err {
            GetRouteError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetRouteError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, query: GetRouteQuery) -> Result<RouteDetailResponse, GetRouteError>
where
    R: RouteRepository + ?Sized,
{
    repo.get_route(query.id)
        .await?
        .map(RouteDetailResponse::from)
        .ok_or(GetRouteError::NotFound(query.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{AirportRepository, MemoryRepository};
    use crate::models::{NewAirport, NewRoute};

    #[tokio::test]
    async fn test_detail_nests_airports() {
        let repo = MemoryRepository::new();
        let source = repo
            .insert_airport(NewAirport {
                name: "Boryspil".to_string(),
                closest_big_city: "Kyiv".to_string(),
            })
            .await
            .unwrap();
        let destination = repo
            .insert_airport(NewAirport {
                name: "Danylo Halytskyi".to_string(),
                closest_big_city: "Lviv".to_string(),
            })
            .await
            .unwrap();
        let route = repo
            .insert_route(NewRoute {
                source_id: source.id,
                destination_id: destination.id,
                distance: 470,
            })
            .await
            .unwrap();

        let detail = handle(&repo, GetRouteQuery { id: route.id }).await.unwrap();
        assert_eq!(detail.source, source);
        assert_eq!(detail.destination, destination);

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["destination"]["closest_big_city"], "Lviv");
    }
}
