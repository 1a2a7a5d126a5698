pub mod get;
pub mod list;

pub use get::{GetFlightError, GetFlightQuery};
pub use list::{ListFlightsError, ListFlightsQuery};
