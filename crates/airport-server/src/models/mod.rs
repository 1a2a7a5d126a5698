//! Database models
//!
//! Plain entity values returned by the repositories. Relations are carried as
//! ids; the `*Details` structs bundle an entity with the related rows the API
//! nests into its responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Airport {
    pub id: i64,
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: i64,
    pub source_id: i64,
    pub destination_id: i64,
    /// Kilometres
    pub distance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Crew {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Crew {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AirplaneType {
    pub id: i64,
    pub name: String,
}

/// An airplane and its seating grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Airplane {
    pub id: i64,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: i64,
}

impl Airplane {
    /// Total number of seats, `rows * seats_in_row`
    pub fn capacity(&self) -> i64 {
        i64::from(self.rows) * i64::from(self.seats_in_row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Flight {
    pub id: i64,
    pub route_id: i64,
    pub airplane_id: i64,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[sqlx(skip)]
    pub crew_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub customer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i64,
    pub row: i32,
    pub seat: i32,
    pub flight_id: i64,
    pub order_id: i64,
}

/// A (row, seat) pair on one flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, FromRow)]
pub struct SeatPosition {
    pub row: i32,
    pub seat: i32,
}

// ============================================================================
// Insert / update payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAirport {
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoute {
    pub source_id: i64,
    pub destination_id: i64,
    pub distance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCrew {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAirplaneType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAirplane {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlight {
    pub route_id: i64,
    pub airplane_id: i64,
    pub crew_ids: Vec<i64>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

impl NewFlight {
    /// Crew ids sorted with duplicates removed
    pub fn crew_set(&self) -> Vec<i64> {
        let mut ids = self.crew_ids.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewTicket {
    pub flight_id: i64,
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: Option<String>,
    pub tickets: Vec<NewTicket>,
}

// ============================================================================
// Joined read models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDetails {
    pub route: Route,
    pub source: Airport,
    pub destination: Airport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirplaneDetails {
    pub airplane: Airplane,
    pub airplane_type: AirplaneType,
}

/// A flight with everything the list and detail views render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightDetails {
    pub flight: Flight,
    pub route: RouteDetails,
    pub airplane: AirplaneDetails,
    pub crew: Vec<Crew>,
    /// Sold seats ordered by (row, seat)
    pub taken_places: Vec<SeatPosition>,
}

impl FlightDetails {
    pub fn tickets_sold(&self) -> i64 {
        self.taken_places.len() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithTickets {
    pub order: Order,
    /// Ordered by (row, seat)
    pub tickets: Vec<Ticket>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_rows_times_seats() {
        let airplane = Airplane {
            id: 1,
            name: "UR-BAA".to_string(),
            rows: 10,
            seats_in_row: 5,
            airplane_type_id: 1,
        };
        assert_eq!(airplane.capacity(), 50);
    }

    #[test]
    fn test_capacity_does_not_overflow_i32() {
        let airplane = Airplane {
            id: 1,
            name: "Huge".to_string(),
            rows: i32::MAX,
            seats_in_row: 2,
            airplane_type_id: 1,
        };
        assert_eq!(airplane.capacity(), i64::from(i32::MAX) * 2);
    }

    #[test]
    fn test_crew_full_name() {
        let crew = Crew {
            id: 1,
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
        };
        assert_eq!(crew.full_name(), "Jane Smith");
    }

    #[test]
    fn test_crew_set_sorts_and_dedups() {
        let flight = NewFlight {
            route_id: 1,
            airplane_id: 1,
            crew_ids: vec![3, 1, 3, 2],
            departure_time: Utc::now(),
            arrival_time: Utc::now(),
        };
        assert_eq!(flight.crew_set(), vec![1, 2, 3]);
    }

    #[test]
    fn test_seat_positions_order_by_row_then_seat() {
        let mut seats = vec![
            SeatPosition { row: 2, seat: 1 },
            SeatPosition { row: 1, seat: 3 },
            SeatPosition { row: 1, seat: 2 },
        ];
        seats.sort();
        assert_eq!(
            seats,
            vec![
                SeatPosition { row: 1, seat: 2 },
                SeatPosition { row: 1, seat: 3 },
                SeatPosition { row: 2, seat: 1 },
            ]
        );
    }
}
