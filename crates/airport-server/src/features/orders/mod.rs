//! Orders and the tickets booked with them

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    CreateOrderCommand, CreateOrderError, DeleteOrderCommand, DeleteOrderError, TicketRequest,
};
pub use queries::{GetOrderError, GetOrderQuery, ListOrdersError, ListOrdersQuery};
pub use routes::orders_routes;
pub use types::{OrderCreatedResponse, OrderResponse, OrderTicketItem, TicketResponse};
