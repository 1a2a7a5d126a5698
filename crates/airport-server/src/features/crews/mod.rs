//! Crew members assignable to flights

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateCrewCommand, CreateCrewError, DeleteCrewCommand, DeleteCrewError, UpdateCrewCommand,
    UpdateCrewError,
};
pub use queries::{GetCrewError, GetCrewQuery, ListCrewsError, ListCrewsQuery};
pub use routes::crews_routes;
pub use types::CrewResponse;
