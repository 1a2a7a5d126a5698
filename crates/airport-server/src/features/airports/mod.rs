//! Airports: where routes start and end

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateAirportCommand, CreateAirportError, DeleteAirportCommand, DeleteAirportError,
    UpdateAirportCommand, UpdateAirportError,
};
pub use queries::{GetAirportError, GetAirportQuery, ListAirportsError, ListAirportsQuery};
pub use routes::airports_routes;
