use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirplaneRepository, DbError};
use crate::error::AppError;
use crate::features::airplanes::types::AirplaneResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAirplaneQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetAirplaneError {
    #[error("Airplane '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<AirplaneResponse, GetAirplaneError>> for GetAirplaneQuery {}

impl crate::cqrs::Query for GetAirplaneQuery {
    const NAME: &'static str = "get_airplane";
}

impl From<GetAirplaneError> for AppError {
    fn from(err: GetAirplaneError) -> Self {
        match err {
            GetAirplaneError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetAirplaneError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, query: GetAirplaneQuery) -> Result<AirplaneResponse, GetAirplaneError>
where
    R: AirplaneRepository + ?Sized,
{
    repo.get_airplane(query.id)
        .await?
        .map(AirplaneResponse::from)
        .ok_or(GetAirplaneError::NotFound(query.id))
}
