use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{CrewRepository, DbError};
use crate::error::AppError;
use crate::features::crews::types::CrewResponse;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCrewsQuery {}

#[derive(Debug, thiserror::Error)]
pub enum ListCrewsError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Vec<CrewResponse>, ListCrewsError>> for ListCrewsQuery {}

impl crate::cqrs::Query for ListCrewsQuery {
    const NAME: &'static str = "list_crews";
}

impl From<ListCrewsError> for AppError {
    fn from(err: ListCrewsError) -> Self {
        match err {
            ListCrewsError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, _query: ListCrewsQuery) -> Result<Vec<CrewResponse>, ListCrewsError>
where
    R: CrewRepository + ?Sized,
{
    let crews = repo.list_crews().await?;
    Ok(crews.into_iter().map(CrewResponse::from).collect())
}
