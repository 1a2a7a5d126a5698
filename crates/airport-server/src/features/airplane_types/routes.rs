//! Airplane type API routes
//!
//! - `POST /api/v1/airplane-types`
//! - `GET /api/v1/airplane-types`
//! - `GET /api/v1/airplane-types/:id`
//! - `PUT|PATCH /api/v1/airplane-types/:id`
//! - `DELETE /api/v1/airplane-types/:id`

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use super::commands::{
    self, CreateAirplaneTypeCommand, DeleteAirplaneTypeCommand, UpdateAirplaneTypeCommand,
};
use super::queries::{self, GetAirplaneTypeQuery, ListAirplaneTypesQuery};
use crate::api::response::{ApiResponse, Deleted};
use crate::cqrs::{execute_command, execute_query};
use crate::db::SharedRepository;
use crate::error::ApiResult;
use crate::models::AirplaneType;

pub fn airplane_types_routes() -> Router<SharedRepository> {
    Router::new()
        .route("/", get(list_airplane_types).post(create_airplane_type))
        .route(
            "/:id",
            get(get_airplane_type)
                .put(update_airplane_type)
                .patch(update_airplane_type)
                .delete(delete_airplane_type),
        )
}

#[tracing::instrument(skip(repo, command), fields(name = %command.name))]
async fn create_airplane_type(
    State(repo): State<SharedRepository>,
    Json(command): Json<CreateAirplaneTypeCommand>,
) -> ApiResult<Response> {
    let created = execute_command(command, |c| commands::create::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(created).created())
}

#[tracing::instrument(skip(repo))]
async fn list_airplane_types(
    State(repo): State<SharedRepository>,
) -> ApiResult<ApiResponse<Vec<AirplaneType>>> {
    let types = execute_query(ListAirplaneTypesQuery::default(), |q| {
        queries::list::handle(repo.as_ref(), q)
    })
    .await?;
    Ok(ApiResponse::success(types))
}

#[tracing::instrument(skip(repo))]
async fn get_airplane_type(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<AirplaneType>> {
    let airplane_type = execute_query(GetAirplaneTypeQuery { id }, |q| {
        queries::get::handle(repo.as_ref(), q)
    })
    .await?;
    Ok(ApiResponse::success(airplane_type))
}

#[tracing::instrument(skip(repo, command))]
async fn update_airplane_type(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateAirplaneTypeCommand>,
) -> ApiResult<ApiResponse<AirplaneType>> {
    command.id = id;
    let updated = execute_command(command, |c| commands::update::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(updated))
}

/// Deleting a type deletes its airplanes and their flights.
#[tracing::instrument(skip(repo))]
async fn delete_airplane_type(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Deleted>> {
    let deleted = execute_command(DeleteAirplaneTypeCommand { id }, |c| {
        commands::delete::handle(repo.as_ref(), c)
    })
    .await?;
    Ok(ApiResponse::success(deleted))
}
