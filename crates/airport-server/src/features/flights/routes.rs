//! Flight API routes
//!
//! - `POST /api/v1/flights`
//! - `GET /api/v1/flights?airplane_name=..&crew=1,2`
//! - `GET /api/v1/flights/:id`
//! - `PUT|PATCH /api/v1/flights/:id`
//! - `DELETE /api/v1/flights/:id`

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Json, Router,
};

use super::commands::{self, CreateFlightCommand, DeleteFlightCommand, UpdateFlightCommand};
use super::queries::{self, GetFlightQuery, ListFlightsQuery};
use super::types::{FlightDetailResponse, FlightListItem, FlightWriteResponse};
use crate::api::response::{ApiResponse, Deleted};
use crate::cqrs::{execute_command, execute_query};
use crate::db::SharedRepository;
use crate::error::ApiResult;

pub fn flights_routes() -> Router<SharedRepository> {
    Router::new()
        .route("/", get(list_flights).post(create_flight))
        .route(
            "/:id",
            get(get_flight)
                .put(update_flight)
                .patch(update_flight)
                .delete(delete_flight),
        )
}

/// `POST /api/v1/flights`
///
/// - `201 Created` - body carries ids, crew as a sorted id list
/// - `400 Bad Request` - unknown route, airplane or crew member
#[tracing::instrument(skip(repo, command), fields(route = command.route))]
async fn create_flight(
    State(repo): State<SharedRepository>,
    Json(command): Json<CreateFlightCommand>,
) -> ApiResult<Response> {
    let flight = execute_command(command, |c| commands::create::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(flight).created())
}

/// `GET /api/v1/flights`
///
/// # Query Parameters
///
/// - `airplane_name` - case-insensitive substring of the airplane name
/// - `crew` - comma-separated crew ids, e.g. `crew=1,2`
///
/// - `200 OK` - flights ordered by id, each listed once
/// - `400 Bad Request` - a crew id is not an integer
#[tracing::instrument(skip(repo))]
async fn list_flights(
    State(repo): State<SharedRepository>,
    Query(query): Query<ListFlightsQuery>,
) -> ApiResult<ApiResponse<Vec<FlightListItem>>> {
    let flights = execute_query(query, |q| queries::list::handle(repo.as_ref(), q)).await?;
    Ok(ApiResponse::success(flights))
}

#[tracing::instrument(skip(repo))]
async fn get_flight(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<FlightDetailResponse>> {
    let flight = execute_query(GetFlightQuery { id }, |q| queries::get::handle(repo.as_ref(), q)).await?;
    Ok(ApiResponse::success(flight))
}

#[tracing::instrument(skip(repo, command))]
async fn update_flight(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateFlightCommand>,
) -> ApiResult<ApiResponse<FlightWriteResponse>> {
    command.id = id;
    let flight = execute_command(command, |c| commands::update::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(flight))
}

#[tracing::instrument(skip(repo))]
async fn delete_flight(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Deleted>> {
    let deleted = execute_command(DeleteFlightCommand { id }, |c| {
        commands::delete::handle(repo.as_ref(), c)
    })
    .await?;
    Ok(ApiResponse::success(deleted))
}
