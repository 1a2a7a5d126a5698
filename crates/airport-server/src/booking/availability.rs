//! Seat availability
//!
//! Availability is never stored; it is derived on every read from the
//! airplane's capacity and the number of tickets sold for the flight.

use crate::models::{Airplane, FlightDetails};

/// `capacity - tickets_sold`
///
/// A negative result means more tickets exist than seats. It is returned
/// unclamped and logged as a data-integrity alarm.
pub fn tickets_available(airplane: &Airplane, tickets_sold: i64) -> i64 {
    let available = airplane.capacity() - tickets_sold;
    if available < 0 {
        tracing::warn!(
            airplane_id = airplane.id,
            capacity = airplane.capacity(),
            tickets_sold,
            "More tickets sold than seats on airplane"
        );
    }
    available
}

/// Availability for an already-loaded flight
pub fn flight_availability(flight: &FlightDetails) -> i64 {
    tickets_available(&flight.airplane.airplane, flight.tickets_sold())
}
