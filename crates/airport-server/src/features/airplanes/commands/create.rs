use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirplaneRepository, DbError};
use crate::error::AppError;
use crate::features::airplanes::types::AirplaneResponse;
use crate::features::shared::validation::{
    validate_name, validate_positive, FieldError, MAX_NAME_LENGTH,
};
use crate::models::NewAirplane;

/// Command to register an airplane
///
/// ```json
/// { "name": "UR-BAA", "rows": 10, "seats_in_row": 5, "airplane_type": 1 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAirplaneCommand {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    /// Airplane type id
    pub airplane_type: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateAirplaneError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Airplane '{0}' disappeared after insert")]
    Missing(i64),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<AirplaneResponse, CreateAirplaneError>> for CreateAirplaneCommand {}

impl crate::cqrs::Command for CreateAirplaneCommand {
    const NAME: &'static str = "create_airplane";
}

impl From<CreateAirplaneError> for AppError {
    fn from(err: CreateAirplaneError) -> Self {
        match err {
            CreateAirplaneError::Validation(e) => e.into(),
            CreateAirplaneError::Missing(_) => AppError::NotFound(err.to_string()),
            CreateAirplaneError::Database(e) => e.into(),
        }
    }
}

impl CreateAirplaneCommand {
    /// Name required; the seat grid must be at least 1x1
    pub fn validate(&self) -> Result<(), CreateAirplaneError> {
        validate_name("name", &self.name, MAX_NAME_LENGTH)?;
        validate_positive("rows", self.rows)?;
        validate_positive("seats_in_row", self.seats_in_row)?;
        Ok(())
    }
}

#[tracing::instrument(skip(repo), fields(name = %command.name))]
pub async fn handle<R>(
    repo: &R,
    command: CreateAirplaneCommand,
) -> Result<AirplaneResponse, CreateAirplaneError>
where
    R: AirplaneRepository + ?Sized,
{
    command.validate()?;

    let airplane = repo
        .insert_airplane(NewAirplane {
            name: command.name,
            rows: command.rows,
            seats_in_row: command.seats_in_row,
            airplane_type_id: command.airplane_type,
        })
        .await?;

    tracing::info!(
        airplane_id = airplane.id,
        capacity = airplane.capacity(),
        "Airplane created"
    );

    repo.get_airplane(airplane.id)
        .await?
        .map(AirplaneResponse::from)
        .ok_or(CreateAirplaneError::Missing(airplane.id))
}
