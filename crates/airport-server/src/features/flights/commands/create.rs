use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, FlightRepository};
use crate::error::AppError;
use crate::features::flights::types::{warn_if_schedule_inverted, FlightWriteResponse};
use crate::models::NewFlight;

/// Command to schedule a flight
///
/// ```json
/// {
///   "route": 1,
///   "airplane": 2,
///   "crew": [1, 3],
///   "departure_time": "2024-05-01T10:00:00Z",
///   "arrival_time": "2024-05-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFlightCommand {
    pub route: i64,
    pub airplane: i64,
    #[serde(default)]
    pub crew: Vec<i64>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateFlightError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<FlightWriteResponse, CreateFlightError>> for CreateFlightCommand {}

impl crate::cqrs::Command for CreateFlightCommand {
    const NAME: &'static str = "create_flight";
}

impl From<CreateFlightError> for AppError {
    fn from(err: CreateFlightError) -> Self {
        match err {
            CreateFlightError::Database(e) => e.into(),
        }
    }
}

#[tracing::instrument(skip(repo), fields(route = command.route, airplane = command.airplane))]
pub async fn handle<R>(
    repo: &R,
    command: CreateFlightCommand,
) -> Result<FlightWriteResponse, CreateFlightError>
where
    R: FlightRepository + ?Sized,
{
    warn_if_schedule_inverted(command.departure_time, command.arrival_time);

    let flight = repo
        .insert_flight(NewFlight {
            route_id: command.route,
            airplane_id: command.airplane,
            crew_ids: command.crew,
            departure_time: command.departure_time,
            arrival_time: command.arrival_time,
        })
        .await?;

    tracing::info!(flight_id = flight.id, "Flight created");
    Ok(flight.into())
}
