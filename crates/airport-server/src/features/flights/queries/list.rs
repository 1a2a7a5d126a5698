//! List flights query
//!
//! Filters come from the query string:
//! - `airplane_name`: case-insensitive substring of the airplane name
//! - `crew`: comma-separated crew ids; a flight matches when any of them
//!   is on its crew

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, FlightFilter, FlightRepository};
use crate::error::AppError;
use crate::features::flights::types::FlightListItem;
use crate::features::shared::validation::{parse_id_list, FieldError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFlightsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airplane_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListFlightsError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Vec<FlightListItem>, ListFlightsError>> for ListFlightsQuery {}

impl crate::cqrs::Query for ListFlightsQuery {
    const NAME: &'static str = "list_flights";
}

impl From<ListFlightsError> for AppError {
    fn from(err: ListFlightsError) -> Self {
        match err {
            ListFlightsError::Validation(e) => e.into(),
            ListFlightsError::Database(e) => e.into(),
        }
    }
}

impl ListFlightsQuery {
    /// Parse the raw query string values into a repository filter
    ///
    /// Blank values are treated as absent; a non-blank airplane name is
    /// matched exactly as given, surrounding whitespace included.
    pub fn to_filter(&self) -> Result<FlightFilter, ListFlightsError> {
        let airplane_name = self
            .airplane_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string);

        let crew_ids = match self.crew.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_id_list("crew", raw)?),
            _ => None,
        };

        Ok(FlightFilter {
            airplane_name,
            crew_ids,
            flight_ids: None,
        })
    }
}

#[tracing::instrument(skip(repo))]
pub async fn handle<R>(repo: &R, query: ListFlightsQuery) -> Result<Vec<FlightListItem>, ListFlightsError>
where
    R: FlightRepository + ?Sized,
{
    let filter = query.to_filter()?;
    let flights = repo.list_flights(&filter).await?;
    Ok(flights.iter().map(FlightListItem::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_filters() {
        let filter = ListFlightsQuery::default().to_filter().unwrap();
        assert_eq!(filter, FlightFilter::default());
    }

    #[test]
    fn test_crew_ids_parsed() {
        let query = ListFlightsQuery {
            airplane_name: Some(" UR-BAA ".to_string()),
            crew: Some("1, 2".to_string()),
        };
        let filter = query.to_filter().unwrap();
        assert_eq!(filter.airplane_name.as_deref(), Some(" UR-BAA "));
        assert_eq!(filter.crew_ids, Some(vec![1, 2]));
    }

    #[test]
    fn test_blank_airplane_name_ignored() {
        let query = ListFlightsQuery {
            airplane_name: Some("   ".to_string()),
            crew: None,
        };
        assert_eq!(query.to_filter().unwrap().airplane_name, None);
    }

    #[test]
    fn test_non_integer_crew_id_rejected() {
        let query = ListFlightsQuery {
            airplane_name: None,
            crew: Some("1,pilot".to_string()),
        };
        match query.to_filter() {
            Err(ListFlightsError::Validation(e)) => assert_eq!(e.field, "crew"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
