//! Routes between two airports
//!
//! Named `air_routes` to keep it apart from the HTTP routing modules.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateRouteCommand, CreateRouteError, DeleteRouteCommand, DeleteRouteError,
    UpdateRouteCommand, UpdateRouteError,
};
pub use queries::{GetRouteError, GetRouteQuery, ListRoutesError, ListRoutesQuery};
pub use routes::air_routes_routes;
pub use types::{RouteDetailResponse, RouteListItem, RouteWriteResponse};
