pub mod get;
pub mod list;

pub use get::{GetAirplaneTypeError, GetAirplaneTypeQuery};
pub use list::{ListAirplaneTypesError, ListAirplaneTypesQuery};
