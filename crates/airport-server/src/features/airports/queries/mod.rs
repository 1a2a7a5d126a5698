pub mod get;
pub mod list;

pub use get::{GetAirportError, GetAirportQuery};
pub use list::{ListAirportsError, ListAirportsQuery};
