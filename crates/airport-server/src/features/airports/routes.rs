//! Airport API routes
//!
//! # Route Structure
//!
//! - `POST /api/v1/airports` - Create an airport
//! - `GET /api/v1/airports` - List airports
//! - `GET /api/v1/airports/:id` - Get a single airport
//! - `PUT|PATCH /api/v1/airports/:id` - Update an airport
//! - `DELETE /api/v1/airports/:id` - Delete an airport and its routes

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};

use super::commands::{self, CreateAirportCommand, DeleteAirportCommand, UpdateAirportCommand};
use super::queries::{self, GetAirportQuery, ListAirportsQuery};
use crate::api::response::{ApiResponse, Deleted};
use crate::cqrs::{execute_command, execute_query};
use crate::db::SharedRepository;
use crate::error::ApiResult;
use crate::models::Airport;

/// Creates the airports router
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api/v1/airports", airports_routes())
///     .with_state(repo);
/// ```
pub fn airports_routes() -> Router<SharedRepository> {
    Router::new()
        .route("/", get(list_airports).post(create_airport))
        .route(
            "/:id",
            get(get_airport)
                .put(update_airport)
                .patch(update_airport)
                .delete(delete_airport),
        )
}

/// `POST /api/v1/airports`
///
/// ```json
/// { "name": "Boryspil", "closest_big_city": "Kyiv" }
/// ```
///
/// - `201 Created`
/// - `400 Bad Request` - blank or overlong name
#[tracing::instrument(skip(repo, command), fields(name = %command.name))]
async fn create_airport(
    State(repo): State<SharedRepository>,
    Json(command): Json<CreateAirportCommand>,
) -> ApiResult<Response> {
    let airport = execute_command(command, |c| commands::create::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(airport).created())
}

#[tracing::instrument(skip(repo))]
async fn list_airports(State(repo): State<SharedRepository>) -> ApiResult<ApiResponse<Vec<Airport>>> {
    let airports = execute_query(ListAirportsQuery::default(), |q| {
        queries::list::handle(repo.as_ref(), q)
    })
    .await?;
    Ok(ApiResponse::success(airports))
}

/// `GET /api/v1/airports/:id`
///
/// - `404 Not Found` - unknown id
#[tracing::instrument(skip(repo))]
async fn get_airport(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Airport>> {
    let airport = execute_query(GetAirportQuery { id }, |q| {
        queries::get::handle(repo.as_ref(), q)
    })
    .await?;
    Ok(ApiResponse::success(airport))
}

/// `PUT|PATCH /api/v1/airports/:id`
///
/// Only the fields present in the body change.
#[tracing::instrument(skip(repo, command))]
async fn update_airport(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateAirportCommand>,
) -> ApiResult<ApiResponse<Airport>> {
    command.id = id;
    let airport = execute_command(command, |c| commands::update::handle(repo.as_ref(), c)).await?;
    Ok(ApiResponse::success(airport))
}

/// `DELETE /api/v1/airports/:id`
///
/// Routes that start or end here are deleted too, along with their flights.
#[tracing::instrument(skip(repo))]
async fn delete_airport(
    State(repo): State<SharedRepository>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Deleted>> {
    let deleted = execute_command(DeleteAirportCommand { id }, |c| {
        commands::delete::handle(repo.as_ref(), c)
    })
    .await?;
    Ok(ApiResponse::success(deleted))
}
