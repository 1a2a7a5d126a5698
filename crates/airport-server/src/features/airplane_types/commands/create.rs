use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirplaneTypeRepository, DbError};
use crate::error::AppError;
use crate::features::shared::validation::{validate_name, FieldError, MAX_NAME_LENGTH};
use crate::models::{AirplaneType, NewAirplaneType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAirplaneTypeCommand {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateAirplaneTypeError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<AirplaneType, CreateAirplaneTypeError>> for CreateAirplaneTypeCommand {}

impl crate::cqrs::Command for CreateAirplaneTypeCommand {
    const NAME: &'static str = "create_airplane_type";
}

impl From<CreateAirplaneTypeError> for AppError {
    fn from(err: CreateAirplaneTypeError) -> Self {
        match err {
            CreateAirplaneTypeError::Validation(e) => e.into(),
            CreateAirplaneTypeError::Database(e) => e.into(),
        }
    }
}

impl CreateAirplaneTypeCommand {
    pub fn validate(&self) -> Result<(), CreateAirplaneTypeError> {
        validate_name("name", &self.name, MAX_NAME_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(
    repo: &R,
    command: CreateAirplaneTypeCommand,
) -> Result<AirplaneType, CreateAirplaneTypeError>
where
    R: AirplaneTypeRepository + ?Sized,
{
    command.validate()?;
    let airplane_type = repo
        .insert_airplane_type(NewAirplaneType { name: command.name })
        .await?;
    tracing::info!(airplane_type_id = airplane_type.id, "Airplane type created");
    Ok(airplane_type)
}
