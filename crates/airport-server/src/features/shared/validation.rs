//! Shared validation utilities
//!
//! Every validation failure is a [`FieldError`]: the offending field, a
//! human-readable message and, for range checks, the inclusive bound. The
//! same shape is returned in the `details` of a `VALIDATION_ERROR` response.
//!
//! # Examples
//!
//! ```rust,ignore
//! use airport_server::features::shared::validation::{validate_name, validate_positive};
//!
//! validate_name("name", &command.name, MAX_NAME_LENGTH)?;
//! validate_positive("rows", command.rows)?;
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::booking::RangeError;
use crate::error::AppError;

/// Maximum length of free-text names, matching the VARCHAR(255) columns
pub const MAX_NAME_LENGTH: usize = 255;

/// A single invalid input field
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// Inclusive range the value had to fall in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound: Option<(i32, i32)>,
    /// Position of the offending ticket within an order request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_index: Option<usize>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            bound: None,
            ticket_index: None,
        }
    }

    pub fn at_ticket(mut self, index: usize) -> Self {
        self.ticket_index = Some(index);
        self
    }
}

impl From<RangeError> for FieldError {
    fn from(err: RangeError) -> Self {
        Self {
            field: err.field.to_string(),
            message: err.to_string(),
            bound: Some(err.bound),
            ticket_index: None,
        }
    }
}

impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        let details = serde_json::to_value(&err).unwrap_or(serde_json::Value::Null);
        AppError::validation_with_details(err.to_string(), details)
    }
}

/// Validate a required free-text field
///
/// # Rules
/// - Must contain something other than whitespace
/// - Must not exceed `max_length` characters
pub fn validate_name(field: &str, value: &str, max_length: usize) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, "This field may not be blank"));
    }

    if value.chars().count() > max_length {
        return Err(FieldError::new(
            field,
            format!("Ensure this field has no more than {} characters", max_length),
        ));
    }

    Ok(())
}

/// Validate an integer that must be `>= 0`
pub fn validate_non_negative(field: &str, value: i32) -> Result<(), FieldError> {
    if value < 0 {
        return Err(FieldError::new(
            field,
            format!("Ensure this value is greater than or equal to 0, got {}", value),
        ));
    }
    Ok(())
}

/// Validate an integer that must be `>= 1`
pub fn validate_positive(field: &str, value: i32) -> Result<(), FieldError> {
    if value < 1 {
        return Err(FieldError::new(
            field,
            format!("Ensure this value is greater than or equal to 1, got {}", value),
        ));
    }
    Ok(())
}

/// Parse a comma-separated list of ids such as `"1,2, 3"`
///
/// Empty segments are skipped; any non-integer segment is an error.
pub fn parse_id_list(field: &str, raw: &str) -> Result<Vec<i64>, FieldError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| FieldError::new(field, format!("'{}' is not a valid id", s)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::SeatField;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Boryspil", MAX_NAME_LENGTH).is_ok());
        assert_eq!(
            validate_name("name", "   ", MAX_NAME_LENGTH).unwrap_err().field,
            "name"
        );
        assert!(validate_name("name", &"a".repeat(256), MAX_NAME_LENGTH).is_err());
        assert!(validate_name("name", &"a".repeat(255), MAX_NAME_LENGTH).is_ok());
    }

    #[test]
    fn test_validate_name_counts_characters_not_bytes() {
        assert!(validate_name("name", &"ї".repeat(255), MAX_NAME_LENGTH).is_ok());
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_non_negative("distance", 0).is_ok());
        assert!(validate_non_negative("distance", -1).is_err());
        assert!(validate_positive("rows", 1).is_ok());
        assert!(validate_positive("rows", 0).is_err());
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("crew", "1,2").unwrap(), vec![1, 2]);
        assert_eq!(parse_id_list("crew", " 3 , ,4").unwrap(), vec![3, 4]);
        assert!(parse_id_list("crew", "").unwrap().is_empty());

        let err = parse_id_list("crew", "1,abc").unwrap_err();
        assert_eq!(err.field, "crew");
        assert!(err.message.contains("abc"));
    }

    #[test]
    fn test_range_error_conversion() {
        let err = FieldError::from(RangeError {
            field: SeatField::Row,
            value: 11,
            bound: (1, 10),
        })
        .at_ticket(2);

        assert_eq!(err.field, "row");
        assert_eq!(err.bound, Some((1, 10)));
        assert_eq!(err.ticket_index, Some(2));

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["bound"], serde_json::json!([1, 10]));
        assert_eq!(json["ticket_index"], 2);
    }

    #[test]
    fn test_plain_field_error_omits_optional_details() {
        let json = serde_json::to_value(FieldError::new("tickets", "empty")).unwrap();
        assert!(json.get("bound").is_none());
        assert!(json.get("ticket_index").is_none());
    }
}
