use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{CrewRepository, DbError};
use crate::error::AppError;
use crate::features::crews::types::CrewResponse;
use crate::features::shared::validation::{validate_name, FieldError, MAX_NAME_LENGTH};
use crate::models::NewCrew;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCrewCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateCrewError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Crew member '{0}' not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<CrewResponse, UpdateCrewError>> for UpdateCrewCommand {}

impl crate::cqrs::Command for UpdateCrewCommand {
    const NAME: &'static str = "update_crew";
}

impl From<UpdateCrewError> for AppError {
    fn from(err: UpdateCrewError) -> Self {
        match err {
            UpdateCrewError::Validation(e) => e.into(),
            UpdateCrewError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateCrewError::Database(e) => e.into(),
        }
    }
}

impl UpdateCrewCommand {
    pub fn validate(&self) -> Result<(), UpdateCrewError> {
        if self.first_name.is_none() && self.last_name.is_none() {
            return Err(FieldError::new(
                "non_field_errors",
                "At least one field must be provided for update",
            )
            .into());
        }
        if let Some(ref first_name) = self.first_name {
            validate_name("first_name", first_name, MAX_NAME_LENGTH)?;
        }
        if let Some(ref last_name) = self.last_name {
            validate_name("last_name", last_name, MAX_NAME_LENGTH)?;
        }
        Ok(())
    }
}

#[tracing::instrument(skip(repo, command), fields(crew_id = command.id))]
pub async fn handle<R>(repo: &R, command: UpdateCrewCommand) -> Result<CrewResponse, UpdateCrewError>
where
    R: CrewRepository + ?Sized,
{
    command.validate()?;

    let current = repo
        .get_crew(command.id)
        .await?
        .ok_or(UpdateCrewError::NotFound(command.id))?;

    let updated = repo
        .update_crew(
            command.id,
            NewCrew {
                first_name: command.first_name.unwrap_or(current.first_name),
                last_name: command.last_name.unwrap_or(current.last_name),
            },
        )
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => UpdateCrewError::NotFound(command.id),
            other => other.into(),
        })?;

    Ok(updated.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;

    #[tokio::test]
    async fn test_update_last_name_only() {
        let repo = MemoryRepository::new();
        let crew = repo
            .insert_crew(NewCrew {
                first_name: "Taras".to_string(),
                last_name: "Shevchuk".to_string(),
            })
            .await
            .unwrap();

        let updated = handle(
            &repo,
            UpdateCrewCommand {
                id: crew.id,
                last_name: Some("Bondar".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.full_name, "Taras Bondar");
    }
}
