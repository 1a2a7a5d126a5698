use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirplaneTypeRepository, DbError};
use crate::error::AppError;
use crate::features::shared::validation::{validate_name, FieldError, MAX_NAME_LENGTH};
use crate::models::{AirplaneType, NewAirplaneType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAirplaneTypeCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateAirplaneTypeError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Airplane type '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<AirplaneType, UpdateAirplaneTypeError>> for UpdateAirplaneTypeCommand {}

impl crate::cqrs::Command for UpdateAirplaneTypeCommand {
    const NAME: &'static str = "update_airplane_type";
}

impl From<UpdateAirplaneTypeError> for AppError {
    fn from(err: UpdateAirplaneTypeError) -> Self {
        match err {
            UpdateAirplaneTypeError::Validation(e) => e.into(),
            UpdateAirplaneTypeError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateAirplaneTypeError::Database(e) => e.into(),
        }
    }
}

impl UpdateAirplaneTypeCommand {
    pub fn validate(&self) -> Result<(), UpdateAirplaneTypeError> {
        match self.name {
            Some(ref name) => validate_name("name", name, MAX_NAME_LENGTH)?,
            None => {
                return Err(FieldError::new(
                    "non_field_errors",
                    "At least one field must be provided for update",
                )
                .into())
            },
        }
        Ok(())
    }
}

#[tracing::instrument(skip(repo, command), fields(airplane_type_id = command.id))]
pub async fn handle<R>(
    repo: &R,
    command: UpdateAirplaneTypeCommand,
) -> Result<AirplaneType, UpdateAirplaneTypeError>
where
    R: AirplaneTypeRepository + ?Sized,
{
    command.validate()?;

    let current = repo
        .get_airplane_type(command.id)
        .await?
        .ok_or(UpdateAirplaneTypeError::NotFound(command.id))?;

    let updated = repo
        .update_airplane_type(
            command.id,
            NewAirplaneType {
                name: command.name.unwrap_or(current.name),
            },
        )
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => UpdateAirplaneTypeError::NotFound(command.id),
            other => other.into(),
        })?;

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;

    #[tokio::test]
    async fn test_rename_type() {
        let repo = MemoryRepository::new();
        let created = repo
            .insert_airplane_type(NewAirplaneType {
                name: "Airbus".to_string(),
            })
            .await
            .unwrap();

        let updated = handle(
            &repo,
            UpdateAirplaneTypeCommand {
                id: created.id,
                name: Some("Airbus A320".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Airbus A320");
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let cmd = UpdateAirplaneTypeCommand::default();
        assert!(matches!(
            cmd.validate(),
            Err(UpdateAirplaneTypeError::Validation(_))
        ));
    }
}
