use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, FlightRepository, OrderRepository};
use crate::error::AppError;
use crate::features::orders::types::{render_orders, visible_to, OrderResponse};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOrderQuery {
    pub id: i64,
    #[serde(skip)]
    pub customer: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetOrderError {
    #[error("Order '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<OrderResponse, GetOrderError>> for GetOrderQuery {}

impl crate::cqrs::Query for GetOrderQuery {
    const NAME: &'static str = "get_order";
}

impl From<GetOrderError> for AppError {
    fn from(err: GetOrderError) -> Self {
        match err {
            GetOrderError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetOrderError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, query: GetOrderQuery) -> Result<OrderResponse, GetOrderError>
where
    R: OrderRepository + FlightRepository + ?Sized,
{
    let order = repo
        .get_order(query.id)
        .await?
        .filter(|o| visible_to(o, query.customer.as_deref()))
        .ok_or(GetOrderError::NotFound(query.id))?;

    render_orders(repo, vec![order])
        .await?
        .pop()
        .ok_or(GetOrderError::NotFound(query.id))
}
