//! Flight representations
//!
//! Every read form carries `tickets_available`, computed from the airplane's
//! capacity and the tickets sold at the time of the read.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::booking::flight_availability;
use crate::features::air_routes::types::{RouteDetailResponse, RouteListItem};
use crate::features::airplanes::types::AirplaneResponse;
use crate::features::crews::types::CrewResponse;
use crate::models::{Flight, FlightDetails, SeatPosition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightListItem {
    pub id: i64,
    pub route: RouteListItem,
    /// Airplane name
    pub airplane: String,
    /// Crew full names
    pub crew: Vec<String>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub tickets_available: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightDetailResponse {
    pub id: i64,
    pub route: RouteDetailResponse,
    pub airplane: AirplaneResponse,
    pub crew: Vec<CrewResponse>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub tickets_available: i64,
    /// Sold seats ordered by (row, seat)
    pub taken_places: Vec<SeatPosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightWriteResponse {
    pub id: i64,
    pub route: i64,
    pub airplane: i64,
    pub crew: Vec<i64>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

impl From<&FlightDetails> for FlightListItem {
    fn from(details: &FlightDetails) -> Self {
        Self {
            id: details.flight.id,
            route: RouteListItem::from(&details.route),
            airplane: details.airplane.airplane.name.clone(),
            crew: details.crew.iter().map(|c| c.full_name()).collect(),
            departure_time: details.flight.departure_time,
            arrival_time: details.flight.arrival_time,
            tickets_available: flight_availability(details),
        }
    }
}

impl From<FlightDetails> for FlightDetailResponse {
    fn from(details: FlightDetails) -> Self {
        let tickets_available = flight_availability(&details);
        Self {
            id: details.flight.id,
            route: details.route.into(),
            airplane: details.airplane.into(),
            crew: details.crew.into_iter().map(CrewResponse::from).collect(),
            departure_time: details.flight.departure_time,
            arrival_time: details.flight.arrival_time,
            tickets_available,
            taken_places: details.taken_places,
        }
    }
}

impl From<Flight> for FlightWriteResponse {
    fn from(flight: Flight) -> Self {
        Self {
            id: flight.id,
            route: flight.route_id,
            airplane: flight.airplane_id,
            crew: flight.crew_ids,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
        }
    }
}

/// Arrival at or before departure is accepted but logged
pub(crate) fn warn_if_schedule_inverted(
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
) {
    if arrival_time <= departure_time {
        tracing::warn!(
            %departure_time,
            %arrival_time,
            "Flight arrives at or before its departure"
        );
    }
}
