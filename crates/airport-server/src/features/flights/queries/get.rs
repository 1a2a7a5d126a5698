use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, FlightRepository};
use crate::error::AppError;
use crate::features::flights::types::FlightDetailResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFlightQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetFlightError {
    #[error("Flight '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<FlightDetailResponse, GetFlightError>> for GetFlightQuery {}

impl crate::cqrs::Query for GetFlightQuery {
    const NAME: &'static str = "get_flight";
}

impl From<GetFlightError> for AppError {
    fn from(err: GetFlightError) -> Self {
        match err {
            GetFlightError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetFlightError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, query: GetFlightQuery) -> Result<FlightDetailResponse, GetFlightError>
where
    R: FlightRepository + ?Sized,
{
    repo.get_flight(query.id)
        .await?
        .map(FlightDetailResponse::from)
        .ok_or(GetFlightError::NotFound(query.id))
}
