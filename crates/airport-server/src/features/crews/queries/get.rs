use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{CrewRepository, DbError};
use crate::error::AppError;
use crate::features::crews::types::CrewResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCrewQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetCrewError {
    #[error("Crew member '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<CrewResponse, GetCrewError>> for GetCrewQuery {}

impl crate::cqrs::Query for GetCrewQuery {
    const NAME: &'static str = "get_crew";
}

impl From<GetCrewError> for AppError {
    fn from(err: GetCrewError) -> Self {
        match err {
            GetCrewError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetCrewError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, query: GetCrewQuery) -> Result<CrewResponse, GetCrewError>
where
    R: CrewRepository + ?Sized,
{
    repo.get_crew(query.id)
        .await?
        .map(CrewResponse::from)
        .ok_or(GetCrewError::NotFound(query.id))
}
