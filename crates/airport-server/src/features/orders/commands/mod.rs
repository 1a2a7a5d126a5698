pub mod create;
pub mod delete;

pub use create::{CreateOrderCommand, CreateOrderError, TicketRequest};
pub use delete::{DeleteOrderCommand, DeleteOrderError};
