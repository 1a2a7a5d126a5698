use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirplaneTypeRepository, DbError};
use crate::error::AppError;
use crate::models::AirplaneType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAirplaneTypeQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetAirplaneTypeError {
    #[error("Airplane type '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<AirplaneType, GetAirplaneTypeError>> for GetAirplaneTypeQuery {}

impl crate::cqrs::Query for GetAirplaneTypeQuery {
    const NAME: &'static str = "get_airplane_type";
}

impl From<GetAirplaneTypeError> for AppError {
    fn from(err: GetAirplaneTypeError) -> Self {
        match err {
            GetAirplaneTypeError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetAirplaneTypeError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(
    repo: &R,
    query: GetAirplaneTypeQuery,
) -> Result<AirplaneType, GetAirplaneTypeError>
where
    R: AirplaneTypeRepository + ?Sized,
{
    repo.get_airplane_type(query.id)
        .await?
        .ok_or(GetAirplaneTypeError::NotFound(query.id))
}
