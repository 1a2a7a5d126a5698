use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, FlightRepository, OrderRepository};
use crate::error::AppError;
use crate::features::orders::types::{render_orders, OrderResponse};

/// Orders by id; `customer` restricts the list to one caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(skip)]
    pub customer: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListOrdersError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Vec<OrderResponse>, ListOrdersError>> for ListOrdersQuery {}

impl crate::cqrs::Query for ListOrdersQuery {
    const NAME: &'static str = "list_orders";
}

impl From<ListOrdersError> for AppError {
    fn from(err: ListOrdersError) -> Self {
        match err {
            ListOrdersError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, query: ListOrdersQuery) -> Result<Vec<OrderResponse>, ListOrdersError>
where
    R: OrderRepository + FlightRepository + ?Sized,
{
    let orders = repo.list_orders(query.customer.as_deref()).await?;
    Ok(render_orders(repo, orders).await?)
}
