//! Delete order command
//!
//! Tickets go with the order and their seats become free again.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::api::response::Deleted;
use crate::db::{DbError, OrderRepository};
use crate::error::AppError;
use crate::features::orders::types::visible_to;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOrderCommand {
    pub id: i64,
    /// Caller id from the `x-user-id` header
    #[serde(skip)]
    pub customer: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteOrderError {
    #[error("Order '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Deleted, DeleteOrderError>> for DeleteOrderCommand {}

impl crate::cqrs::Command for DeleteOrderCommand {
    const NAME: &'static str = "delete_order";
}

impl From<DeleteOrderError> for AppError {
    fn from(err: DeleteOrderError) -> Self {
        match err {
            DeleteOrderError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteOrderError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, command: DeleteOrderCommand) -> Result<Deleted, DeleteOrderError>
where
    R: OrderRepository + ?Sized,
{
    let order = repo
        .get_order(command.id)
        .await?
        .filter(|o| visible_to(o, command.customer.as_deref()))
        .ok_or(DeleteOrderError::NotFound(command.id))?;

    repo.delete_order(order.order.id).await.map_err(|e| match e {
        DbError::NotFound(_) => DeleteOrderError::NotFound(command.id),
        other => other.into(),
    })?;

    tracing::info!(
        order_id = command.id,
        tickets = order.tickets.len(),
        "Order deleted"
    );
    Ok(Deleted::new(command.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;
    use crate::models::NewOrder;

    #[tokio::test]
    async fn test_other_customers_order_is_hidden() {
        let repo = MemoryRepository::new();
        let order = repo
            .create_order(NewOrder {
                customer: Some("alice".to_string()),
                tickets: vec![],
            })
            .await
            .unwrap();

        let result = handle(
            &repo,
            DeleteOrderCommand {
                id: order.order.id,
                customer: Some("bob".to_string()),
            },
        )
        .await;
        assert!(matches!(result, Err(DeleteOrderError::NotFound(_))));
        assert!(repo.get_order(order.order.id).await.unwrap().is_some());

        handle(
            &repo,
            DeleteOrderCommand {
                id: order.order.id,
                customer: Some("alice".to_string()),
            },
        )
        .await
        .unwrap();
        assert!(repo.get_order(order.order.id).await.unwrap().is_none());
    }
}
