use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirplaneRepository, DbError};
use crate::error::AppError;
use crate::features::airplanes::types::AirplaneResponse;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAirplanesQuery {}

#[derive(Debug, thiserror::Error)]
pub enum ListAirplanesError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Vec<AirplaneResponse>, ListAirplanesError>> for ListAirplanesQuery {}

impl crate::cqrs::Query for ListAirplanesQuery {
    const NAME: &'static str = "list_airplanes";
}

impl From<ListAirplanesError> for AppError {
    fn from(err: ListAirplanesError) -> Self {
        match err {
            ListAirplanesError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(
    repo: &R,
    _query: ListAirplanesQuery,
) -> Result<Vec<AirplaneResponse>, ListAirplanesError>
where
    R: AirplaneRepository + ?Sized,
{
    let airplanes = repo.list_airplanes().await?;
    Ok(airplanes.into_iter().map(AirplaneResponse::from).collect())
}
