//! Route API routes
//!
//! - `POST /api/v1/routes`
//! - `GET /api/v1/routes`
//! - `GET /api/v1/routes/:id`
//! - `PUT|PATCH /api/v1/routes/:id`
//! - `DELETE /api/v1/routes/:id`

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use super::commands::{self, CreateRouteCommand, DeleteRouteCommand, UpdateRouteCommand};
use super::queries::{self, GetRouteQuery, ListRoutesQuery};
use super::types::{RouteDetailResponse, RouteListItem, RouteWriteResponse};
use crate::api::response::{ApiResponse, Deleted};
use crate::cqrs::{execute_command, execute_query};
use crate::db::SharedRepository;
use crate::error::ApiResult;

pub fn air_routes_routes() -> Router<SharedRepository> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route(
            "/:id",
            get(get_route)
                .put(update_route)
                .patch(update_route)
                .delete(delete_route),
        )
}

/// `POST /api/v1/routes`
///
/// - `201 Created` - body echoes the airport ids
/// - `400 Bad Request` - negative distance or unknown airport
#[tracing::instrument(skip(repo))]
async fn create_route(
    State(repo): State<SharedRepository>,
    Json(command): Json<CreateRouteCommand>,
) -> ApiResult<Response> {
    let route = execute_command(command, |c| commands::create::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(route).created())
}

#[tracing::instrument(skip(repo))]
async fn list_routes(State(repo): State<SharedRepository>) -> ApiResult<ApiResponse<Vec<RouteListItem>>> {
    let routes = execute_query(ListRoutesQuery::default(), |q| {
        queries::list::handle(repo.as_ref(), q)
    })
    .await?;
    Ok(ApiResponse::success(routes))
}

#[tracing::instrument(skip(repo))]
async fn get_route(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<RouteDetailResponse>> {
    let route = execute_query(GetRouteQuery { id }, |q| queries::get::handle(repo.as_ref(), q)).await?;
    Ok(ApiResponse::success(route))
}

#[tracing::instrument(skip(repo, command))]
async fn update_route(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateRouteCommand>,
) -> ApiResult<ApiResponse<RouteWriteResponse>> {
    command.id = id;
    let route = execute_command(command, |c| commands::update::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(route))
}

#[tracing::instrument(skip(repo))]
async fn delete_route(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Deleted>> {
    let deleted = execute_command(DeleteRouteCommand { id }, |c| {
        commands::delete::handle(repo.as_ref(), c)
    })
    .await?;
    Ok(ApiResponse::success(deleted))
}
