//! Ticket placement validation
//!
//! Checks that a requested (row, seat) lies inside an airplane's seating grid.
//! Row is checked before seat and only the first failing field is reported.
//! Whether the seat is already sold is a storage concern, see
//! [`SeatConflict`](super::SeatConflict).

use serde::Serialize;
use std::fmt;

use crate::models::Airplane;

/// Which coordinate of a placement failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatField {
    Row,
    Seat,
}

impl SeatField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Seat => "seat",
        }
    }
}

impl fmt::Display for SeatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row or seat number outside `[1, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    pub field: SeatField,
    pub value: i32,
    /// Inclusive bounds, always starting at 1
    pub bound: (i32, i32),
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} number must be in available range: ({}, {}), got {}",
            self.field, self.bound.0, self.bound.1, self.value
        )
    }
}

impl std::error::Error for RangeError {}

/// Validate a (row, seat) request against the airplane's grid
pub fn validate_ticket_placement(
    row: i32,
    seat: i32,
    airplane: &Airplane,
) -> Result<(), RangeError> {
    check_range(SeatField::Row, row, airplane.rows)?;
    check_range(SeatField::Seat, seat, airplane.seats_in_row)?;
    Ok(())
}

fn check_range(field: SeatField, value: i32, max: i32) -> Result<(), RangeError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(RangeError {
            field,
            value,
            bound: (1, max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airplane(rows: i32, seats_in_row: i32) -> Airplane {
        Airplane {
            id: 1,
            name: "UR-BAA".to_string(),
            rows,
            seats_in_row,
            airplane_type_id: 1,
        }
    }

    #[test]
    fn test_corners_of_grid_are_valid() {
        let plane = airplane(10, 5);
        assert!(validate_ticket_placement(1, 1, &plane).is_ok());
        assert!(validate_ticket_placement(10, 5, &plane).is_ok());
        assert!(validate_ticket_placement(1, 5, &plane).is_ok());
        assert!(validate_ticket_placement(10, 1, &plane).is_ok());
    }

    #[test]
    fn test_row_out_of_range() {
        let plane = airplane(10, 5);

        let err = validate_ticket_placement(11, 1, &plane).unwrap_err();
        assert_eq!(err.field, SeatField::Row);
        assert_eq!(err.value, 11);
        assert_eq!(err.bound, (1, 10));

        let err = validate_ticket_placement(0, 1, &plane).unwrap_err();
        assert_eq!(err.field, SeatField::Row);
        assert_eq!(err.value, 0);
    }

    #[test]
    fn test_seat_out_of_range() {
        let plane = airplane(10, 5);

        let err = validate_ticket_placement(1, 6, &plane).unwrap_err();
        assert_eq!(err.field, SeatField::Seat);
        assert_eq!(err.bound, (1, 5));

        let err = validate_ticket_placement(1, 0, &plane).unwrap_err();
        assert_eq!(err.field, SeatField::Seat);
    }

    #[test]
    fn test_negative_values_rejected() {
        let plane = airplane(10, 5);
        let err = validate_ticket_placement(-3, 2, &plane).unwrap_err();
        assert_eq!(err.field, SeatField::Row);
        assert_eq!(err.value, -3);
    }

    #[test]
    fn test_row_reported_before_seat() {
        let plane = airplane(10, 5);
        let err = validate_ticket_placement(0, 0, &plane).unwrap_err();
        assert_eq!(err.field, SeatField::Row);
    }

    #[test]
    fn test_error_message() {
        let plane = airplane(10, 5);
        let err = validate_ticket_placement(11, 1, &plane).unwrap_err();
        assert_eq!(
            err.to_string(),
            "row number must be in available range: (1, 10), got 11"
        );
    }

    #[test]
    fn test_single_seat_airplane() {
        let plane = airplane(1, 1);
        assert!(validate_ticket_placement(1, 1, &plane).is_ok());
        assert!(validate_ticket_placement(2, 1, &plane).is_err());
        assert!(validate_ticket_placement(1, 2, &plane).is_err());
    }
}
