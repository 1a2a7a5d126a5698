use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RouteRepository};
use crate::error::AppError;
use crate::features::air_routes::types::RouteListItem;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRoutesQuery {}

#[derive(Debug, thiserror::Error)]
pub enum ListRoutesError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Vec<RouteListItem>, ListRoutesError>> for ListRoutesQuery {}

impl crate::cqrs::Query for ListRoutesQuery {
    const NAME: &'static str = "list_routes";
}

impl From<ListRoutesError> for AppError {
    fn from(err: ListRoutesError) -> Self {
        match err {
            ListRoutesError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, _query: ListRoutesQuery) -> Result<Vec<RouteListItem>, ListRoutesError>
where
    R: RouteRepository + ?Sized,
{
    let routes = repo.list_routes().await?;
    Ok(routes.iter().map(RouteListItem::from).collect())
}
