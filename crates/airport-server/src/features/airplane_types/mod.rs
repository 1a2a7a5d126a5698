pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateAirplaneTypeCommand, CreateAirplaneTypeError, DeleteAirplaneTypeCommand,
    DeleteAirplaneTypeError, UpdateAirplaneTypeCommand, UpdateAirplaneTypeError,
};
pub use queries::{
    GetAirplaneTypeError, GetAirplaneTypeQuery, ListAirplaneTypesError, ListAirplaneTypesQuery,
};
pub use routes::airplane_types_routes;
