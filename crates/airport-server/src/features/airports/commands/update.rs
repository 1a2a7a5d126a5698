//! Update airport command
//!
//! Partial update: absent fields keep their stored value.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirportRepository, DbError};
use crate::error::AppError;
use crate::features::shared::validation::{validate_name, FieldError, MAX_NAME_LENGTH};
use crate::models::{Airport, NewAirport};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAirportCommand {
    /// Taken from the path
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest_big_city: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateAirportError {
    #[error("{0}")]
    Validation(#[from] FieldError),

    #[error("Airport '{0}' not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Airport, UpdateAirportError>> for UpdateAirportCommand {}

impl crate::cqrs::Command for UpdateAirportCommand {
    const NAME: &'static str = "update_airport";
}

impl From<UpdateAirportError> for AppError {
    fn from(err: UpdateAirportError) -> Self {
        match err {
            UpdateAirportError::Validation(e) => e.into(),
            UpdateAirportError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateAirportError::Database(e) => e.into(),
        }
    }
}

impl UpdateAirportCommand {
    pub fn validate(&self) -> Result<(), UpdateAirportError> {
        if self.name.is_none() && self.closest_big_city.is_none() {
            return Err(FieldError::new(
                "non_field_errors",
                "At least one field must be provided for update",
            )
            .into());
        }
        if let Some(ref name) = self.name {
            validate_name("name", name, MAX_NAME_LENGTH)?;
        }
        if let Some(ref city) = self.closest_big_city {
            validate_name("closest_big_city", city, MAX_NAME_LENGTH)?;
        }
        Ok(())
    }
}

#[tracing::instrument(skip(repo, command), fields(airport_id = command.id))]
pub async fn handle<R>(repo: &R, command: UpdateAirportCommand) -> Result<Airport, UpdateAirportError>
where
    R: AirportRepository + ?Sized,
{
    command.validate()?;

    let current = repo
        .get_airport(command.id)
        .await?
        .ok_or(UpdateAirportError::NotFound(command.id))?;

    let updated = repo
        .update_airport(
            command.id,
            NewAirport {
                name: command.name.unwrap_or(current.name),
                closest_big_city: command.closest_big_city.unwrap_or(current.closest_big_city),
            },
        )
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => UpdateAirportError::NotFound(command.id),
            other => other.into(),
        })?;

    tracing::info!("Airport updated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;

    #[test]
    fn test_validate_requires_a_field() {
        let cmd = UpdateAirportCommand {
            id: 1,
            ..Default::default()
        };
        assert!(matches!(
            cmd.validate(),
            Err(UpdateAirportError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let repo = MemoryRepository::new();
        let airport = repo
            .insert_airport(NewAirport {
                name: "Zhuliany".to_string(),
                closest_big_city: "Kyiv".to_string(),
            })
            .await
            .unwrap();

        let updated = handle(
            &repo,
            UpdateAirportCommand {
                id: airport.id,
                name: Some("Igor Sikorsky".to_string()),
                closest_big_city: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Igor Sikorsky");
        assert_eq!(updated.closest_big_city, "Kyiv");
    }

    #[tokio::test]
    async fn test_update_missing_airport() {
        let repo = MemoryRepository::new();
        let result = handle(
            &repo,
            UpdateAirportCommand {
                id: 5,
                name: Some("X".to_string()),
                closest_big_city: None,
            },
        )
        .await;
        assert!(matches!(result, Err(UpdateAirportError::NotFound(5))));
    }
}
