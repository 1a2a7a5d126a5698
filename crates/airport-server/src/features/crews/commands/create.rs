use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{CrewRepository, DbError};
use crate::error::AppError;
use crate::features::crews::types::CrewResponse;
use crate::features::shared::validation::{validate_name, FieldError, MAX_NAME_LENGTH};
use crate::models::NewCrew;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCrewCommand {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateCrewError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<CrewResponse, CreateCrewError>> for CreateCrewCommand {}

impl crate::cqrs::Command for CreateCrewCommand {
    const NAME: &'static str = "create_crew";
}

impl From<CreateCrewError> for AppError {
    fn from(err: CreateCrewError) -> Self {
        match err {
            CreateCrewError::Validation(e) => e.into(),
            CreateCrewError::Database(e) => e.into(),
        }
    }
}

impl CreateCrewCommand {
    pub fn validate(&self) -> Result<(), CreateCrewError> {
        validate_name("first_name", &self.first_name, MAX_NAME_LENGTH)?;
        validate_name("last_name", &self.last_name, MAX_NAME_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, command: CreateCrewCommand) -> Result<CrewResponse, CreateCrewError>
where
    R: CrewRepository + ?Sized,
{
    command.validate()?;
    let crew = repo
        .insert_crew(NewCrew {
            first_name: command.first_name,
            last_name: command.last_name,
        })
        .await?;
    tracing::info!(crew_id = crew.id, "Crew member created");
    Ok(crew.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;

    #[tokio::test]
    async fn test_create_returns_full_name() {
        let repo = MemoryRepository::new();
        let crew = handle(
            &repo,
            CreateCrewCommand {
                first_name: "Olena".to_string(),
                last_name: "Kovalenko".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(crew.full_name, "Olena Kovalenko");
    }

    #[test]
    fn test_blank_last_name() {
        let cmd = CreateCrewCommand {
            first_name: "Olena".to_string(),
            last_name: String::new(),
        };
        match cmd.validate() {
            Err(CreateCrewError::Validation(e)) => assert_eq!(e.field, "last_name"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
