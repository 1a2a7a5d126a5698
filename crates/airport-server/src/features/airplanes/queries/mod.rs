pub mod get;
pub mod list;

pub use get::{GetAirplaneError, GetAirplaneQuery};
pub use list::{ListAirplanesError, ListAirplanesQuery};
