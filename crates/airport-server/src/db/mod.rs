//! Storage layer
//!
//! [`Repository`] is the seam between the feature handlers and storage.
//! [`PgRepository`] is backed by Postgres through sqlx; [`MemoryRepository`]
//! keeps everything in process and is used for tests and local runs.

pub mod error_helpers;
pub mod memory;
pub mod postgres;
pub mod repository;

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::booking::{validate_ticket_placement, RangeError, SeatConflict};
use crate::models::{Airplane, NewTicket};

pub use memory::MemoryRepository;
pub use postgres::PgRepository;
pub use repository::{
    AirplaneRepository, AirplaneTypeRepository, AirportRepository, CrewRepository, FlightFilter,
    FlightRepository, OrderRepository, Repository, RouteRepository,
};

/// Repository handle shared by every request
pub type SharedRepository = Arc<dyn Repository>;

/// Database operation errors with contextual information
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Database configuration is invalid or missing
    #[error("Database configuration error: {0}. Check DATABASE_URL and connection settings.")]
    Config(String),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Record already exists (unique constraint violation)
    #[error("{0}")]
    Duplicate(String),

    /// A foreign key points at a row that does not exist
    #[error("{entity} {id} does not exist")]
    InvalidReference { entity: &'static str, id: i64 },

    /// A CHECK constraint rejected the row
    #[error("Constraint '{0}' violated")]
    Constraint(String),

    /// The seat already has a ticket on that flight
    #[error(transparent)]
    SeatTaken(#[from] SeatConflict),

    /// Ticket `index` lies outside its flight's seating grid
    #[error("Ticket {index}: {error}")]
    Placement { index: usize, error: RangeError },
}

impl DbError {
    /// Create a not found error with resource context
    pub fn not_found(resource_type: &str, id: i64) -> Self {
        Self::NotFound(format!("{} '{}' not found", resource_type, id))
    }

    /// Create a duplicate error with resource context
    pub fn duplicate(resource_type: &str, identifier: &str) -> Self {
        Self::Duplicate(format!("{} '{}' already exists", resource_type, identifier))
    }

    pub fn invalid_reference(entity: &'static str, id: i64) -> Self {
        Self::InvalidReference { entity, id }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Check every ticket against the airplane of its flight
///
/// `airplanes` is keyed by flight id. Repositories call this with the
/// airplanes read under the same lock or transaction that stores the
/// tickets.
pub(crate) fn check_placements(
    tickets: &[NewTicket],
    airplanes: &HashMap<i64, Airplane>,
) -> DbResult<()> {
    for (index, ticket) in tickets.iter().enumerate() {
        let airplane = airplanes
            .get(&ticket.flight_id)
            .ok_or(DbError::invalid_reference("Flight", ticket.flight_id))?;
        validate_ticket_placement(ticket.row, ticket.seat, airplane)
            .map_err(|error| DbError::Placement { index, error })?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: Option<u64>,
}

impl From<&crate::config::DatabaseConfig> for DbConfig {
    fn from(config: &crate::config::DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            connect_timeout_secs: config.connect_timeout_secs,
            idle_timeout_secs: Some(config.idle_timeout_secs),
        }
    }
}

pub async fn create_pool(config: &DbConfig) -> DbResult<PgPool> {
    if config.url.is_empty() {
        return Err(DbError::config("DATABASE_URL is empty"));
    }

    let mut options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs));

    if let Some(idle_timeout) = config.idle_timeout_secs {
        options = options.idle_timeout(Duration::from_secs(idle_timeout));
    }

    let pool = options.connect(&config.url).await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

pub async fn health_check(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[test]
    fn test_db_config_from_database_config() {
        let source = DatabaseConfig {
            url: "postgresql://localhost/airport_test".to_string(),
            max_connections: 15,
            min_connections: 3,
            connect_timeout_secs: 5,
            idle_timeout_secs: 120,
        };

        let config = DbConfig::from(&source);
        assert_eq!(config.max_connections, 15);
        assert_eq!(config.min_connections, 3);
        assert_eq!(config.idle_timeout_secs, Some(120));
        assert!(config.url.contains("airport_test"));
    }

    #[tokio::test]
    async fn test_create_pool_rejects_empty_url() {
        let config = DbConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_secs: 1,
            idle_timeout_secs: None,
        };
        let result = create_pool(&config).await;
        assert!(matches!(result, Err(DbError::Config(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DbError::not_found("Airport", 4).to_string(),
            "Airport '4' not found"
        );
        assert_eq!(
            DbError::invalid_reference("Flight", 9).to_string(),
            "Flight 9 does not exist"
        );
        let conflict = SeatConflict {
            flight: 1,
            row: 1,
            seat: 1,
        };
        assert_eq!(DbError::from(conflict).to_string(), conflict.to_string());
    }

    #[test]
    fn test_check_placements_reports_first_bad_ticket() {
        use crate::booking::SeatField;

        let airplanes = HashMap::from([(
            7,
            Airplane {
                id: 1,
                name: "UR-BAA".to_string(),
                rows: 10,
                seats_in_row: 5,
                airplane_type_id: 1,
            },
        )]);
        let ticket = |flight_id, row, seat| NewTicket {
            flight_id,
            row,
            seat,
        };

        assert!(check_placements(&[ticket(7, 10, 5)], &airplanes).is_ok());

        match check_placements(&[ticket(7, 1, 1), ticket(7, 11, 9)], &airplanes) {
            Err(DbError::Placement { index, error }) => {
                assert_eq!(index, 1);
                assert_eq!(error.field, SeatField::Row);
                assert_eq!(error.bound, (1, 10));
            },
            other => panic!("expected placement error, got {:?}", other),
        }

        assert!(matches!(
            check_placements(&[ticket(8, 1, 1)], &airplanes),
            Err(DbError::InvalidReference { entity: "Flight", id: 8 })
        ));
    }
}
