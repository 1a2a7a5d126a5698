//! Airplane API routes
//!
//! - `POST /api/v1/airplanes`
//! - `GET /api/v1/airplanes`
//! - `GET /api/v1/airplanes/:id`
//! - `PUT|PATCH /api/v1/airplanes/:id`
//! - `DELETE /api/v1/airplanes/:id`

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use super::commands::{self, CreateAirplaneCommand, DeleteAirplaneCommand, UpdateAirplaneCommand};
use super::queries::{self, GetAirplaneQuery, ListAirplanesQuery};
use super::types::AirplaneResponse;
use crate::api::response::{ApiResponse, Deleted};
use crate::cqrs::{execute_command, execute_query};
use crate::db::SharedRepository;
use crate::error::ApiResult;

pub fn airplanes_routes() -> Router<SharedRepository> {
    Router::new()
        .route("/", get(list_airplanes).post(create_airplane))
        .route(
            "/:id",
            get(get_airplane)
                .put(update_airplane)
                .patch(update_airplane)
                .delete(delete_airplane),
        )
}

/// `POST /api/v1/airplanes`
///
/// - `201 Created`
/// - `400 Bad Request` - empty grid or unknown airplane type
#[tracing::instrument(skip(repo, command), fields(name = %command.name))]
async fn create_airplane(
    State(repo): State<SharedRepository>,
    Json(command): Json<CreateAirplaneCommand>,
) -> ApiResult<Response> {
    let airplane = execute_command(command, |c| commands::create::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(airplane).created())
}

#[tracing::instrument(skip(repo))]
async fn list_airplanes(
    State(repo): State<SharedRepository>,
) -> ApiResult<ApiResponse<Vec<AirplaneResponse>>> {
    let airplanes = execute_query(ListAirplanesQuery::default(), |q| {
        queries::list::handle(repo.as_ref(), q)
    })
    .await?;
    Ok(ApiResponse::success(airplanes))
}

#[tracing::instrument(skip(repo))]
async fn get_airplane(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<AirplaneResponse>> {
    let airplane = execute_query(GetAirplaneQuery { id }, |q| {
        queries::get::handle(repo.as_ref(), q)
    })
    .await?;
    Ok(ApiResponse::success(airplane))
}

#[tracing::instrument(skip(repo, command))]
async fn update_airplane(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateAirplaneCommand>,
) -> ApiResult<ApiResponse<AirplaneResponse>> {
    command.id = id;
    let airplane = execute_command(command, |c| commands::update::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(airplane))
}

#[tracing::instrument(skip(repo))]
async fn delete_airplane(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Deleted>> {
    let deleted = execute_command(DeleteAirplaneCommand { id }, |c| {
        commands::delete::handle(repo.as_ref(), c)
    })
    .await?;
    Ok(ApiResponse::success(deleted))
}
