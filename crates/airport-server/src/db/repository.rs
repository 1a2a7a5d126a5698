//! Repository traits
//!
//! One trait per aggregate, combined into [`Repository`]. Handlers take
//! `&R where R: XRepository + ?Sized` so they work against `dyn Repository`
//! as well as a concrete implementation.
//!
//! Conventions shared by every implementation:
//! - `get_*` returns `Ok(None)` for a missing id
//! - `update_*` and `delete_*` return [`DbError::NotFound`](super::DbError::NotFound)
//! - a write that references a missing row returns
//!   [`DbError::InvalidReference`](super::DbError::InvalidReference)
//! - deletes cascade the way the schema's foreign keys do

use async_trait::async_trait;
use std::collections::HashMap;

use super::DbResult;
use crate::models::{
    Airplane, AirplaneDetails, AirplaneType, Airport, Crew, Flight, FlightDetails, NewAirplane,
    NewAirplaneType, NewAirport, NewCrew, NewFlight, NewOrder, NewRoute, OrderWithTickets, Route,
    RouteDetails,
};

/// Flight list filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightFilter {
    /// Case-insensitive substring of the airplane name
    pub airplane_name: Option<String>,
    /// Flights whose crew contains any of these ids
    pub crew_ids: Option<Vec<i64>>,
    /// Restrict to these flight ids
    pub flight_ids: Option<Vec<i64>>,
}

impl FlightFilter {
    pub fn by_ids(ids: Vec<i64>) -> Self {
        Self {
            flight_ids: Some(ids),
            ..Self::default()
        }
    }

    /// In-process equivalent of the SQL predicate
    pub fn matches(&self, flight: &FlightDetails) -> bool {
        if let Some(ids) = &self.flight_ids {
            if !ids.contains(&flight.flight.id) {
                return false;
            }
        }
        if let Some(name) = &self.airplane_name {
            let needle = name.to_lowercase();
            if !flight
                .airplane
                .airplane
                .name
                .to_lowercase()
                .contains(&needle)
            {
                return false;
            }
        }
        if let Some(crew_ids) = &self.crew_ids {
            if !flight.flight.crew_ids.iter().any(|id| crew_ids.contains(id)) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
pub trait AirportRepository: Send + Sync {
    async fn list_airports(&self) -> DbResult<Vec<Airport>>;
    async fn get_airport(&self, id: i64) -> DbResult<Option<Airport>>;
    async fn insert_airport(&self, airport: NewAirport) -> DbResult<Airport>;
    async fn update_airport(&self, id: i64, airport: NewAirport) -> DbResult<Airport>;
    async fn delete_airport(&self, id: i64) -> DbResult<()>;
}

#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn list_routes(&self) -> DbResult<Vec<RouteDetails>>;
    async fn get_route(&self, id: i64) -> DbResult<Option<RouteDetails>>;
    async fn insert_route(&self, route: NewRoute) -> DbResult<Route>;
    async fn update_route(&self, id: i64, route: NewRoute) -> DbResult<Route>;
    async fn delete_route(&self, id: i64) -> DbResult<()>;
}

#[async_trait]
pub trait CrewRepository: Send + Sync {
    async fn list_crews(&self) -> DbResult<Vec<Crew>>;
    async fn get_crew(&self, id: i64) -> DbResult<Option<Crew>>;
    async fn insert_crew(&self, crew: NewCrew) -> DbResult<Crew>;
    async fn update_crew(&self, id: i64, crew: NewCrew) -> DbResult<Crew>;
    async fn delete_crew(&self, id: i64) -> DbResult<()>;
}

#[async_trait]
pub trait AirplaneTypeRepository: Send + Sync {
    async fn list_airplane_types(&self) -> DbResult<Vec<AirplaneType>>;
    async fn get_airplane_type(&self, id: i64) -> DbResult<Option<AirplaneType>>;
    async fn insert_airplane_type(&self, airplane_type: NewAirplaneType)
        -> DbResult<AirplaneType>;
    async fn update_airplane_type(
        &self,
        id: i64,
        airplane_type: NewAirplaneType,
    ) -> DbResult<AirplaneType>;
    async fn delete_airplane_type(&self, id: i64) -> DbResult<()>;
}

#[async_trait]
pub trait AirplaneRepository: Send + Sync {
    async fn list_airplanes(&self) -> DbResult<Vec<AirplaneDetails>>;
    async fn get_airplane(&self, id: i64) -> DbResult<Option<AirplaneDetails>>;
    async fn insert_airplane(&self, airplane: NewAirplane) -> DbResult<Airplane>;
    async fn update_airplane(&self, id: i64, airplane: NewAirplane) -> DbResult<Airplane>;
    async fn delete_airplane(&self, id: i64) -> DbResult<()>;
}

#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Distinct flights matching the filter, ordered by id
    async fn list_flights(&self, filter: &FlightFilter) -> DbResult<Vec<FlightDetails>>;
    async fn get_flight(&self, id: i64) -> DbResult<Option<FlightDetails>>;
    async fn insert_flight(&self, flight: NewFlight) -> DbResult<Flight>;
    async fn update_flight(&self, id: i64, flight: NewFlight) -> DbResult<Flight>;
    async fn delete_flight(&self, id: i64) -> DbResult<()>;
    /// Airplane of each existing flight in `flight_ids`; unknown ids are absent
    async fn airplanes_for_flights(&self, flight_ids: &[i64]) -> DbResult<HashMap<i64, Airplane>>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Ordered by id, optionally restricted to one customer
    async fn list_orders(&self, customer: Option<&str>) -> DbResult<Vec<OrderWithTickets>>;
    async fn get_order(&self, id: i64) -> DbResult<Option<OrderWithTickets>>;
    /// Insert the order and all of its tickets, or nothing
    ///
    /// Fails with [`DbError::SeatTaken`](super::DbError::SeatTaken) when any
    /// (flight, row, seat) is already sold or repeated within the order.
    async fn create_order(&self, order: NewOrder) -> DbResult<OrderWithTickets>;
    async fn delete_order(&self, id: i64) -> DbResult<()>;
}

/// Everything the HTTP layer needs from storage
#[async_trait]
pub trait Repository:
    AirportRepository
    + RouteRepository
    + CrewRepository
    + AirplaneTypeRepository
    + AirplaneRepository
    + FlightRepository
    + OrderRepository
{
    /// Storage connectivity check
    async fn ping(&self) -> DbResult<()>;

    /// Short backend name for logs and the health endpoint
    fn backend(&self) -> &'static str;
}
