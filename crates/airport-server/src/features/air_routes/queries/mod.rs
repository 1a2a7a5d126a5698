pub mod get;
pub mod list;

pub use get::{GetRouteError, GetRouteQuery};
pub use list::{ListRoutesError, ListRoutesQuery};
