//! Seat booking rules
//!
//! - [`placement`]: is a (row, seat) inside the airplane's grid
//! - [`availability`]: how many seats are left on a flight
//!
//! Both are pure functions over already-fetched data. Seat uniqueness is
//! enforced by the repositories and surfaces as [`SeatConflict`].

pub mod availability;
pub mod placement;

use serde::Serialize;
use thiserror::Error;

pub use availability::{flight_availability, tickets_available};
pub use placement::{validate_ticket_placement, RangeError, SeatField};

/// A (flight, row, seat) that already has a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error("Seat (row {row}, seat {seat}) on flight {flight} is already taken")]
pub struct SeatConflict {
    pub flight: i64,
    pub row: i32,
    pub seat: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_conflict_message() {
        let conflict = SeatConflict {
            flight: 3,
            row: 2,
            seat: 4,
        };
        assert_eq!(
            conflict.to_string(),
            "Seat (row 2, seat 4) on flight 3 is already taken"
        );
    }

    #[test]
    fn test_seat_conflict_serializes_coordinates() {
        let conflict = SeatConflict {
            flight: 3,
            row: 2,
            seat: 4,
        };
        let json = serde_json::to_value(conflict).unwrap();
        assert_eq!(json, serde_json::json!({"flight": 3, "row": 2, "seat": 4}));
    }
}
