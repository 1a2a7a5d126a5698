//! Feature slices of the booking API
//!
//! Each feature is a vertical slice:
//! - `commands/` - write operations (create, update, delete)
//! - `queries/` - read operations (get, list)
//! - `routes.rs` - HTTP handlers
//! - `types.rs` - response shapes, where they differ from the stored model
//!
//! # Features
//!
//! - **airports**, **air_routes**, **crews**, **airplane_types**,
//!   **airplanes**: reference data
//! - **flights**: scheduling, filtering and seat availability
//! - **orders**: atomic seat booking

pub mod air_routes;
pub mod airplane_types;
pub mod airplanes;
pub mod airports;
pub mod crews;
pub mod flights;
pub mod orders;
pub mod shared;

use axum::Router;

use crate::db::SharedRepository;

/// Creates the `/api/v1` router with every feature mounted under its prefix
pub fn router(repo: SharedRepository) -> Router<()> {
    Router::new()
        .nest("/airports", airports::airports_routes().with_state(repo.clone()))
        .nest("/routes", air_routes::air_routes_routes().with_state(repo.clone()))
        .nest("/crews", crews::crews_routes().with_state(repo.clone()))
        .nest(
            "/airplane-types",
            airplane_types::airplane_types_routes().with_state(repo.clone()),
        )
        .nest("/airplanes", airplanes::airplanes_routes().with_state(repo.clone()))
        .nest("/flights", flights::flights_routes().with_state(repo.clone()))
        .nest("/orders", orders::orders_routes().with_state(repo))
}
