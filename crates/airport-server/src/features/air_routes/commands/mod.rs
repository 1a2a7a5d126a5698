pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateRouteCommand, CreateRouteError};
pub use delete::{DeleteRouteCommand, DeleteRouteError};
pub use update::{UpdateRouteCommand, UpdateRouteError};
