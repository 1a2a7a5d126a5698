//! Airplanes and their seat grids

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateAirplaneCommand, CreateAirplaneError, DeleteAirplaneCommand, DeleteAirplaneError,
    UpdateAirplaneCommand, UpdateAirplaneError,
};
pub use queries::{GetAirplaneError, GetAirplaneQuery, ListAirplanesError, ListAirplanesQuery};
pub use routes::airplanes_routes;
pub use types::AirplaneResponse;
