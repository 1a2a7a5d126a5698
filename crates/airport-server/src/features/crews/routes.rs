//! Crew API routes
//!
//! - `POST /api/v1/crews`
//! - `GET /api/v1/crews`
//! - `GET /api/v1/crews/:id`
//! - `PUT|PATCH /api/v1/crews/:id`
//! - `DELETE /api/v1/crews/:id`

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use super::commands::{self, CreateCrewCommand, DeleteCrewCommand, UpdateCrewCommand};
use super::queries::{self, GetCrewQuery, ListCrewsQuery};
use super::types::CrewResponse;
use crate::api::response::{ApiResponse, Deleted};
use crate::cqrs::{execute_command, execute_query};
use crate::db::SharedRepository;
use crate::error::ApiResult;

pub fn crews_routes() -> Router<SharedRepository> {
    Router::new()
        .route("/", get(list_crews).post(create_crew))
        .route(
            "/:id",
            get(get_crew)
                .put(update_crew)
                .patch(update_crew)
                .delete(delete_crew),
        )
}

/// `POST /api/v1/crews`
///
/// ```json
/// { "first_name": "Olena", "last_name": "Kovalenko" }
/// ```
#[tracing::instrument(skip(repo, command))]
async fn create_crew(
    State(repo): State<SharedRepository>,
    Json(command): Json<CreateCrewCommand>,
) -> ApiResult<Response> {
    let crew = execute_command(command, |c| commands::create::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(crew).created())
}

#[tracing::instrument(skip(repo))]
async fn list_crews(State(repo): State<SharedRepository>) -> ApiResult<ApiResponse<Vec<CrewResponse>>> {
    let crews = execute_query(ListCrewsQuery::default(), |q| {
        queries::list::handle(repo.as_ref(), q)
    })
    .await?;
    Ok(ApiResponse::success(crews))
}

#[tracing::instrument(skip(repo))]
async fn get_crew(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<CrewResponse>> {
    let crew = execute_query(GetCrewQuery { id }, |q| queries::get::handle(repo.as_ref(), q)).await?;
    Ok(ApiResponse::success(crew))
}

#[tracing::instrument(skip(repo, command))]
async fn update_crew(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateCrewCommand>,
) -> ApiResult<ApiResponse<CrewResponse>> {
    command.id = id;
    let crew = execute_command(command, |c| commands::update::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(crew))
}

#[tracing::instrument(skip(repo))]
async fn delete_crew(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Deleted>> {
    let deleted = execute_command(DeleteCrewCommand { id }, |c| {
        commands::delete::handle(repo.as_ref(), c)
    })
    .await?;
    Ok(ApiResponse::success(deleted))
}
