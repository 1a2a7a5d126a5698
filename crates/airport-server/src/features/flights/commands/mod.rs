pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateFlightCommand, CreateFlightError};
pub use delete::{DeleteFlightCommand, DeleteFlightError};
pub use update::{UpdateFlightCommand, UpdateFlightError};
