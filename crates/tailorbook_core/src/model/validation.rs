//! Field-level validation shared by all record types.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Caller-correctable problem with a record's fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field is missing or blank.
    MissingField(&'static str),
    /// Email is present but not shaped like `local@domain`.
    InvalidEmail(String),
    /// Measurement value is negative, NaN or infinite.
    InvalidMeasurement { field: &'static str, value: f64 },
    /// Delivery quantity below the minimum of one garment.
    InvalidQuantity(u32),
    /// Delivery mode `Other` without a recipient name.
    MissingRecipient,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "`{field}` is required"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::InvalidMeasurement { field, value } => {
                write!(f, "measurement `{field}` must be a non-negative number, got {value}")
            }
            Self::InvalidQuantity(value) => {
                write!(f, "quantity must be at least 1, got {value}")
            }
            Self::MissingRecipient => {
                write!(f, "recipient name is required when delivery mode is `Other`")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

pub(crate) fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

/// Collapses blank optional text to `None` so forms can pass empty inputs.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
