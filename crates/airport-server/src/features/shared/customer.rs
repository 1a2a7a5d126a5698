//! Caller identification
//!
//! There is no authentication layer; a front proxy may pass the caller's id
//! in `x-user-id`. Orders remember it and listing filters by it.

use axum::http::HeaderMap;

use super::validation::{FieldError, MAX_NAME_LENGTH};

pub const CUSTOMER_HEADER: &str = "x-user-id";

/// Trimmed, non-empty `x-user-id` value
///
/// Values longer than the stored customer column are rejected.
pub fn customer_from_headers(headers: &HeaderMap) -> Result<Option<String>, FieldError> {
    let customer = headers
        .get(CUSTOMER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match customer {
        Some(value) if value.chars().count() > MAX_NAME_LENGTH => Err(FieldError::new(
            CUSTOMER_HEADER,
            format!("Must be at most {} characters", MAX_NAME_LENGTH),
        )),
        other => Ok(other.map(str::to_string)),
    }
}
