//! Order representations
//!
//! Creating an order echoes ticket ids; listing and detail nest each
//! ticket's flight in its list form.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::db::{DbError, DbResult, FlightFilter, FlightRepository};
use crate::features::flights::types::FlightListItem;
use crate::models::{OrderWithTickets, Ticket};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketResponse {
    pub id: i64,
    pub row: i32,
    pub seat: i32,
    pub flight: i64,
    pub order: i64,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            row: ticket.row,
            seat: ticket.seat,
            flight: ticket.flight_id,
            order: ticket.order_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCreatedResponse {
    pub id: i64,
    pub tickets: Vec<TicketResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderWithTickets> for OrderCreatedResponse {
    fn from(order: OrderWithTickets) -> Self {
        Self {
            id: order.order.id,
            tickets: order.tickets.into_iter().map(TicketResponse::from).collect(),
            created_at: order.order.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTicketItem {
    pub id: i64,
    pub row: i32,
    pub seat: i32,
    pub flight: FlightListItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub tickets: Vec<OrderTicketItem>,
}

/// Render orders with their flights, loading every referenced flight once
pub(crate) async fn render_orders<R>(
    repo: &R,
    orders: Vec<OrderWithTickets>,
) -> DbResult<Vec<OrderResponse>>
where
    R: FlightRepository + ?Sized,
{
    let flight_ids: BTreeSet<i64> = orders
        .iter()
        .flat_map(|o| o.tickets.iter().map(|t| t.flight_id))
        .collect();
    if flight_ids.is_empty() {
        return Ok(orders
            .into_iter()
            .map(|o| OrderResponse {
                id: o.order.id,
                created_at: o.order.created_at,
                tickets: Vec::new(),
            })
            .collect());
    }

    let flights: HashMap<i64, FlightListItem> = repo
        .list_flights(&FlightFilter::by_ids(flight_ids.into_iter().collect()))
        .await?
        .iter()
        .map(|f| (f.flight.id, FlightListItem::from(f)))
        .collect();

    orders
        .into_iter()
        .map(|o| {
            let tickets = o
                .tickets
                .into_iter()
                .map(|t| {
                    let flight = flights
                        .get(&t.flight_id)
                        .cloned()
                        .ok_or_else(|| DbError::not_found("Flight", t.flight_id))?;
                    Ok(OrderTicketItem {
                        id: t.id,
                        row: t.row,
                        seat: t.seat,
                        flight,
                    })
                })
                .collect::<DbResult<Vec<_>>>()?;
            Ok(OrderResponse {
                id: o.order.id,
                created_at: o.order.created_at,
                tickets,
            })
        })
        .collect()
}

/// An order is visible to the caller unless a customer is given and the
/// order belongs to someone else
pub(crate) fn visible_to(order: &OrderWithTickets, customer: Option<&str>) -> bool {
    match customer {
        Some(customer) => order.order.customer.as_deref() == Some(customer),
        None => true,
    }
}
