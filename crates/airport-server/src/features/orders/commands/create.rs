//! Create order command
//!
//! Books every requested seat or none of them:
//! 1. the ticket list must not be empty
//! 2. every referenced flight must exist
//! 3. every (row, seat) must lie inside the flight's airplane grid
//! 4. the order and its tickets are stored in one transaction; a seat that
//!    is already sold, or requested twice, fails the whole order

use mediator::Request;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::booking::{validate_ticket_placement, SeatConflict};
use crate::db::{DbError, FlightRepository, OrderRepository};
use crate::error::AppError;
use crate::features::orders::types::OrderCreatedResponse;
use crate::features::shared::validation::FieldError;
use crate::models::{NewOrder, NewTicket};

/// One requested seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRequest {
    pub flight: i64,
    pub row: i32,
    pub seat: i32,
}

/// Command to place an order
///
/// ```json
/// { "tickets": [{ "flight": 1, "row": 3, "seat": 2 }] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderCommand {
    pub tickets: Vec<TicketRequest>,
    /// Caller id from the `x-user-id` header
    #[serde(skip)]
    pub customer: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateOrderError {
    #[error("{0}")]
    Validation(#[from] FieldError),

    #[error(transparent)]
    SeatTaken(SeatConflict),

    #[error("Database error: {0}")]
    Database(DbError),
}

impl From<DbError> for CreateOrderError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::SeatTaken(conflict) => CreateOrderError::SeatTaken(conflict),
            DbError::Placement { index, error } => {
                CreateOrderError::Validation(FieldError::from(error).at_ticket(index))
            },
            other => CreateOrderError::Database(other),
        }
    }
}

impl Request<Result<OrderCreatedResponse, CreateOrderError>> for CreateOrderCommand {}

impl crate::cqrs::Command for CreateOrderCommand {
    const NAME: &'static str = "create_order";
}

impl From<CreateOrderError> for AppError {
    fn from(err: CreateOrderError) -> Self {
        match err {
            CreateOrderError::Validation(e) => e.into(),
            CreateOrderError::SeatTaken(conflict) => DbError::SeatTaken(conflict).into(),
            CreateOrderError::Database(e) => e.into(),
        }
    }
}

impl CreateOrderCommand {
    pub fn validate(&self) -> Result<(), CreateOrderError> {
        if self.tickets.is_empty() {
            return Err(FieldError::new("tickets", "At least one ticket is required").into());
        }
        Ok(())
    }
}

#[tracing::instrument(
    skip(repo, command),
    fields(tickets = command.tickets.len(), customer = ?command.customer)
)]
pub async fn handle<R>(
    repo: &R,
    command: CreateOrderCommand,
) -> Result<OrderCreatedResponse, CreateOrderError>
where
    R: OrderRepository + FlightRepository + ?Sized,
{
    command.validate()?;

    let flight_ids: Vec<i64> = command
        .tickets
        .iter()
        .map(|t| t.flight)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let airplanes = repo.airplanes_for_flights(&flight_ids).await?;

    for (index, ticket) in command.tickets.iter().enumerate() {
        let airplane = airplanes.get(&ticket.flight).ok_or_else(|| {
            FieldError::new("flight", format!("Flight {} does not exist", ticket.flight))
                .at_ticket(index)
        })?;
        validate_ticket_placement(ticket.row, ticket.seat, airplane)
            .map_err(|e| FieldError::from(e).at_ticket(index))?;
    }

    let order = repo
        .create_order(NewOrder {
            customer: command.customer,
            tickets: command
                .tickets
                .iter()
                .map(|t| NewTicket {
                    flight_id: t.flight,
                    row: t.row,
                    seat: t.seat,
                })
                .collect(),
        })
        .await?;

    tracing::info!(
        order_id = order.order.id,
        tickets = order.tickets.len(),
        "Order created"
    );
    Ok(order.into())
}
