//! Flights: an airplane flying a route with a crew

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateFlightCommand, CreateFlightError, DeleteFlightCommand, DeleteFlightError,
    UpdateFlightCommand, UpdateFlightError,
};
pub use queries::{GetFlightError, GetFlightQuery, ListFlightsError, ListFlightsQuery};
pub use routes::flights_routes;
pub use types::{FlightDetailResponse, FlightListItem, FlightWriteResponse};
