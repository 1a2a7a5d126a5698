use serde::Serialize;

use crate::models::AirplaneDetails;

/// Airplane as rendered by the API, with its type name and seat capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirplaneResponse {
    pub id: i64,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type: String,
    pub capacity: i64,
}

impl From<AirplaneDetails> for AirplaneResponse {
    fn from(details: AirplaneDetails) -> Self {
        let capacity = details.airplane.capacity();
        Self {
            id: details.airplane.id,
            name: details.airplane.name,
            rows: details.airplane.rows,
            seats_in_row: details.airplane.seats_in_row,
            airplane_type: details.airplane_type.name,
            capacity,
        }
    }
}
