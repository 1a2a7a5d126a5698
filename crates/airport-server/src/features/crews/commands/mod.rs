pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateCrewCommand, CreateCrewError};
pub use delete::{DeleteCrewCommand, DeleteCrewError};
pub use update::{UpdateCrewCommand, UpdateCrewError};
