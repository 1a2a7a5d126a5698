pub mod get;
pub mod list;

pub use get::{GetCrewError, GetCrewQuery};
pub use list::{ListCrewsError, ListCrewsQuery};
