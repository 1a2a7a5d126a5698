//! Create airport command

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{AirportRepository, DbError};
use crate::error::AppError;
use crate::features::shared::validation::{validate_name, FieldError, MAX_NAME_LENGTH};
use crate::models::{Airport, NewAirport};

/// Command to create a new airport
///
/// # Examples
///
/// ```rust,ignore
/// let command = CreateAirportCommand {
///     name: "Boryspil".to_string(),
///     closest_big_city: "Kyiv".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAirportCommand {
    pub name: String,
    pub closest_big_city: String,
}

/// Errors that can occur when creating an airport
#[derive(Debug, thiserror::Error)]
pub enum CreateAirportError {
    #[error("{0}")]
    Validation(#[from] FieldError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Airport, CreateAirportError>> for CreateAirportCommand {}

impl crate::cqrs::Command for CreateAirportCommand {
    const NAME: &'static str = "create_airport";
}

impl From<CreateAirportError> for AppError {
    fn from(err: CreateAirportError) -> Self {
        match err {
            CreateAirportError::Validation(e) => e.into(),
            CreateAirportError::Database(e) => e.into(),
        }
    }
}

impl CreateAirportCommand {
    /// Both names are required and at most 255 characters
    pub fn validate(&self) -> Result<(), CreateAirportError> {
        validate_name("name", &self.name, MAX_NAME_LENGTH)?;
        validate_name("closest_big_city", &self.closest_big_city, MAX_NAME_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(repo), fields(name = %command.name))]
pub async fn handle<R>(repo: &R, command: CreateAirportCommand) -> Result<Airport, CreateAirportError>
where
    R: AirportRepository + ?Sized,
{
    command.validate()?;

    let airport = repo
        .insert_airport(NewAirport {
            name: command.name,
            closest_big_city: command.closest_big_city,
        })
        .await?;

    tracing::info!(airport_id = airport.id, "Airport created");
    Ok(airport)
}
