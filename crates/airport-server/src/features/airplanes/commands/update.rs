//! Update airplane command
//!
//! Shrinking the grid does not touch tickets already sold; availability for
//! such a flight may go negative.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirplaneRepository, DbError};
use crate::error::AppError;
use crate::features::airplanes::types::AirplaneResponse;
use crate::features::shared::validation::{
    validate_name, validate_positive, FieldError, MAX_NAME_LENGTH,
};
use crate::models::NewAirplane;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAirplaneCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_in_row: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airplane_type: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateAirplaneError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Airplane '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<AirplaneResponse, UpdateAirplaneError>> for UpdateAirplaneCommand {}

impl crate::cqrs::Command for UpdateAirplaneCommand {
    const NAME: &'static str = "update_airplane";
}

impl From<UpdateAirplaneError> for AppError {
    fn from(err: UpdateAirplaneError) -> Self {
        match err {
            UpdateAirplaneError::Validation(e) => e.into(),
            UpdateAirplaneError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateAirplaneError::Database(e) => e.into(),
        }
    }
}

impl UpdateAirplaneCommand {
    pub fn validate(&self) -> Result<(), UpdateAirplaneError> {
        if self.name.is_none()
            && self.rows.is_none()
            && self.seats_in_row.is_none()
            && self.airplane_type.is_none()
        {
            return Err(FieldError::new(
                "non_field_errors",
                "At least one field must be provided for update",
            )
            .into());
        }
        if let Some(ref name) = self.name {
            validate_name("name", name, MAX_NAME_LENGTH)?;
        }
        if let Some(rows) = self.rows {
            validate_positive("rows", rows)?;
        }
        if let Some(seats_in_row) = self.seats_in_row {
            validate_positive("seats_in_row", seats_in_row)?;
        }
        Ok(())
    }
}

#[tracing::instrument(skip(repo, command), fields(airplane_id = command.id))]
pub async fn handle<R>(
    repo: &R,
    command: UpdateAirplaneCommand,
) -> Result<AirplaneResponse, UpdateAirplaneError>
where
    R: AirplaneRepository + ?Sized,
{
    command.validate()?;

    let current = repo
        .get_airplane(command.id)
        .await?
        .ok_or(UpdateAirplaneError::NotFound(command.id))?
        .airplane;

    let not_found = |e: DbError| match e {
        DbError::NotFound(_) => UpdateAirplaneError::NotFound(command.id),
        other => other.into(),
    };

    repo.update_airplane(
        command.id,
        NewAirplane {
            name: command.name.unwrap_or(current.name),
            rows: command.rows.unwrap_or(current.rows),
            seats_in_row: command.seats_in_row.unwrap_or(current.seats_in_row),
            airplane_type_id: command.airplane_type.unwrap_or(current.airplane_type_id),
        },
    )
    .await
    .map_err(not_found)?;

    repo.get_airplane(command.id)
        .await?
        .map(AirplaneResponse::from)
        .ok_or(UpdateAirplaneError::NotFound(command.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{AirplaneTypeRepository, MemoryRepository};
    use crate::models::NewAirplaneType;

    #[tokio::test]
    async fn test_update_rows_recomputes_capacity() {
        let repo = MemoryRepository::new();
        let airplane_type = repo
            .insert_airplane_type(NewAirplaneType {
                name: "Embraer".to_string(),
            })
            .await
            .unwrap();
        let airplane = repo
            .insert_airplane(NewAirplane {
                name: "UR-EMA".to_string(),
                rows: 10,
                seats_in_row: 4,
                airplane_type_id: airplane_type.id,
            })
            .await
            .unwrap();

        let updated = handle(
            &repo,
            UpdateAirplaneCommand {
                id: airplane.id,
                rows: Some(20),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.rows, 20);
        assert_eq!(updated.seats_in_row, 4);
        assert_eq!(updated.capacity, 80);
    }

    #[test]
    fn test_negative_seats_rejected() {
        let cmd = UpdateAirplaneCommand {
            id: 1,
            seats_in_row: Some(-2),
            ..Default::default()
        };
        assert!(matches!(
            cmd.validate(),
            Err(UpdateAirplaneError::Validation(_))
        ));
    }
}
