use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirplaneTypeRepository, DbError};
use crate::error::AppError;
use crate::models::AirplaneType;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAirplaneTypesQuery {}

#[derive(Debug, thiserror::Error)]
pub enum ListAirplaneTypesError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Vec<AirplaneType>, ListAirplaneTypesError>> for ListAirplaneTypesQuery {}

impl crate::cqrs::Query for ListAirplaneTypesQuery {
    const NAME: &'static str = "list_airplane_types";
}

impl From<ListAirplaneTypesError> for AppError {
    fn from(err: ListAirplaneTypesError) -> Self {
        match err {
            ListAirplaneTypesError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(
    repo: &R,
    _query: ListAirplaneTypesQuery,
) -> Result<Vec<AirplaneType>, ListAirplaneTypesError>
where
    R: AirplaneTypeRepository + ?Sized,
{
    Ok(repo.list_airplane_types().await?)
}
