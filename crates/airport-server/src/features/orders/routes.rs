//! Order API routes
//!
//! - `POST /api/v1/orders` - Book one or more seats atomically
//! - `GET /api/v1/orders` - List orders by id
//! - `GET /api/v1/orders/:id`
//! - `DELETE /api/v1/orders/:id` - Cancel an order and free its seats
//!
//! When the `x-user-id` header is present every route only sees that
//! caller's orders.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    routing::get,
    Json, Router,
};

use super::commands::{self, CreateOrderCommand, DeleteOrderCommand};
use super::queries::{self, GetOrderQuery, ListOrdersQuery};
use super::types::OrderResponse;
use crate::api::response::{ApiResponse, Deleted};
use crate::cqrs::{execute_command, execute_query};
use crate::db::SharedRepository;
use crate::error::ApiResult;
use crate::features::shared::customer_from_headers;

pub fn orders_routes() -> Router<SharedRepository> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).delete(delete_order))
}

/// Book seats
///
/// # Endpoint
///
/// `POST /api/v1/orders`
///
/// # Request Body
///
/// ```json
/// { "tickets": [{ "flight": 1, "row": 3, "seat": 2 }] }
/// ```
///
/// # Response
///
/// - `201 Created` - order and all tickets stored
/// - `400 Bad Request` - empty order, unknown flight or seat outside the
///   airplane; `details.ticket_index` points at the offending ticket.
///   Also returned for an `x-user-id` longer than 255 characters
/// - `409 Conflict` - a seat is already taken; nothing is stored
#[tracing::instrument(skip(repo, headers, command), fields(tickets = command.tickets.len()))]
async fn create_order(
    State(repo): State<SharedRepository>,
    headers: HeaderMap,
    Json(mut command): Json<CreateOrderCommand>,
) -> ApiResult<Response> {
    command.customer = customer_from_headers(&headers)?;
    let order = execute_command(command, |c| commands::create::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(order).created())
}

#[tracing::instrument(skip(repo, headers))]
async fn list_orders(
    State(repo): State<SharedRepository>,
    headers: HeaderMap,
) -> ApiResult<ApiResponse<Vec<OrderResponse>>> {
    let query = ListOrdersQuery {
        customer: customer_from_headers(&headers)?,
    };
    let orders = execute_query(query, |q| queries::list::handle(repo.as_ref(), q)).await?;
    Ok(ApiResponse::success(orders))
}

#[tracing::instrument(skip(repo, headers))]
async fn get_order(
    State(repo): State<SharedRepository>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<OrderResponse>> {
    let query = GetOrderQuery {
        id,
        customer: customer_from_headers(&headers)?,
    };
    let order = execute_query(query, |q| queries::get::handle(repo.as_ref(), q)).await?;
    Ok(ApiResponse::success(order))
}

#[tracing::instrument(skip(repo, headers))]
async fn delete_order(
    State(repo): State<SharedRepository>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Deleted>> {
    let command = DeleteOrderCommand {
        id,
        customer: customer_from_headers(&headers)?,
    };
    let deleted = execute_command(command, |c| commands::delete::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(deleted))
}
