use rust_decimal::Decimal;
use thiserror::Error;

use crate::values::MAX_AMOUNT;

/// Rejections raised when building journal records from user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    Required(&'static str),
    #[error("Field '{field}' must be positive")]
    NotPositive { field: &'static str },
    #[error("Field '{field}' must not be negative")]
    Negative { field: &'static str },
    #[error("Field '{field}' is out of range")]
    OutOfRange { field: &'static str },
    #[error("Exit date cannot be before entry date")]
    ExitBeforeEntry,
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

/// Accept amounts up to `MAX_AMOUNT` in either direction
pub(crate) fn require_within(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, ValidationError> {
    if value.abs() > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange { field });
    }
    Ok(value)
}

pub(crate) fn require_positive(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, ValidationError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(ValidationError::NotPositive { field });
    }
    require_within(field, value)
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative { field });
    }
    require_within(field, value)
}

/// Trim optional free text, dropping blanks
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
