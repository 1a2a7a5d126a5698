pub mod get;
pub mod list;

pub use get::{GetOrderError, GetOrderQuery};
pub use list::{ListOrdersError, ListOrdersQuery};
