pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateAirplaneCommand, CreateAirplaneError};
pub use delete::{DeleteAirplaneCommand, DeleteAirplaneError};
pub use update::{UpdateAirplaneCommand, UpdateAirplaneError};
