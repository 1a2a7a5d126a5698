use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, FlightRepository};
use crate::error::AppError;
use crate::features::flights::types::{warn_if_schedule_inverted, FlightWriteResponse};
use crate::features::shared::validation::FieldError;
use crate::models::NewFlight;

/// Partial flight update; `crew`, when present, replaces the whole crew set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFlightCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airplane: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateFlightError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Flight '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<FlightWriteResponse, UpdateFlightError>> for UpdateFlightCommand {}

impl crate::cqrs::Command for UpdateFlightCommand {
    const NAME: &'static str = "update_flight";
}

impl From<UpdateFlightError> for AppError {
    fn from(err: UpdateFlightError) -> Self {
        match err {
            UpdateFlightError::Validation(e) => e.into(),
            UpdateFlightError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateFlightError::Database(e) => e.into(),
        }
    }
}

impl UpdateFlightCommand {
    pub fn validate(&self) -> Result<(), UpdateFlightError> {
        if self.route.is_none()
            && self.airplane.is_none()
            && self.crew.is_none()
            && self.departure_time.is_none()
            && self.arrival_time.is_none()
        {
            return Err(FieldError::new(
                "non_field_errors",
                "At least one field must be provided for update",
            )
            .into());
        }
        Ok(())
    }
}

#[tracing::instrument(skip(repo, command), fields(flight_id = command.id))]
pub async fn handle<R>(
    repo: &R,
    command: UpdateFlightCommand,
) -> Result<FlightWriteResponse, UpdateFlightError>
where
    R: FlightRepository + ?Sized,
{
    command.validate()?;

    let current = repo
        .get_flight(command.id)
        .await?
        .ok_or(UpdateFlightError::NotFound(command.id))?
        .flight;

    let merged = NewFlight {
        route_id: command.route.unwrap_or(current.route_id),
        airplane_id: command.airplane.unwrap_or(current.airplane_id),
        crew_ids: command.crew.unwrap_or(current.crew_ids),
        departure_time: command.departure_time.unwrap_or(current.departure_time),
        arrival_time: command.arrival_time.unwrap_or(current.arrival_time),
    };
    warn_if_schedule_inverted(merged.departure_time, merged.arrival_time);

    let updated = repo
        .update_flight(command.id, merged)
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => UpdateFlightError::NotFound(command.id),
            other => other.into(),
        })?;

    Ok(updated.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_rejected() {
        let cmd = UpdateFlightCommand {
            id: 3,
            ..Default::default()
        };
        match cmd.validate() {
            Err(UpdateFlightError::Validation(e)) => assert_eq!(e.field, "non_field_errors"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_crew_only_update_is_valid() {
        let cmd = UpdateFlightCommand {
            id: 3,
            crew: Some(vec![]),
            ..Default::default()
        };
        assert!(cmd.validate().is_ok());
    }
}
