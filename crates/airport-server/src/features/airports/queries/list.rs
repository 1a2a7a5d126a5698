use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirportRepository, DbError};
use crate::error::AppError;
use crate::models::Airport;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAirportsQuery {}

#[derive(Debug, thiserror::Error)]
pub enum ListAirportsError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Vec<Airport>, ListAirportsError>> for ListAirportsQuery {}

impl crate::cqrs::Query for ListAirportsQuery {
    const NAME: &'static str = "list_airports";
}

impl From<ListAirportsError> for AppError {
    fn from(err: ListAirportsError) -> Self {
        match err {
            ListAirportsError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, _query: ListAirportsQuery) -> Result<Vec<Airport>, ListAirportsError>
where
    R: AirportRepository + ?Sized,
{
    Ok(repo.list_airports().await?)
}
