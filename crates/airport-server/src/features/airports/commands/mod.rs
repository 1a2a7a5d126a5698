pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateAirportCommand, CreateAirportError};
pub use delete::{DeleteAirportCommand, DeleteAirportError};
pub use update::{UpdateAirportCommand, UpdateAirportError};
