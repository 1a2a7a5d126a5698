use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirportRepository, DbError};
use crate::error::AppError;
use crate::models::Airport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAirportQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetAirportError {
    #[error("Airport '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Airport, GetAirportError>> for GetAirportQuery {}

impl crate::cqrs::Query for GetAirportQuery {
    const NAME: &'static str = "get_airport";
}

impl From<GetAirportError> for AppError {
    fn from(err: GetAirportError) -> Self {
        match err {
            GetAirportError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetAirportError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, query: GetAirportQuery) -> Result<Airport, GetAirportError>
where
    R: AirportRepository + ?Sized,
{
    repo.get_airport(query.id)
        .await?
        .ok_or(GetAirportError::NotFound(query.id))
}
