//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **validation**: Input validation utilities and [`FieldError`]
//! - **customer**: Reading the caller id from request headers

pub mod customer;
pub mod validation;

// Re-export commonly used types
pub use customer::{customer_from_headers, CUSTOMER_HEADER};
pub use validation::{
    parse_id_list, validate_name, validate_non_negative, validate_positive, FieldError,
    MAX_NAME_LENGTH,
};
