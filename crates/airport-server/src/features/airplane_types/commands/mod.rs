pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateAirplaneTypeCommand, CreateAirplaneTypeError};
pub use delete::{DeleteAirplaneTypeCommand, DeleteAirplaneTypeError};
pub use update::{UpdateAirplaneTypeCommand, UpdateAirplaneTypeError};
