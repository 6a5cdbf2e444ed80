//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic planning failures (bad inputs, degenerate
/// arithmetic, missing or duplicate documents). Storage concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required input was missing or out of range. `field` names the offending input.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    /// A computation produced a non-finite value (overflowing inflation, etc).
    #[error("arithmetic degenerate: {0}")]
    ArithmeticDegenerate(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found: {0}")]
    NotFound(String),

    /// A document with the same identity already exists.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::ArithmeticDegenerate(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Require `value` to be finite and `>= 0`.
pub fn ensure_non_negative(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::invalid_parameter(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(DomainError::invalid_parameter(
            field,
            format!("must be >= 0 (got {value})"),
        ));
    }
    Ok(())
}

/// Require `value` to be finite and within `[min, max]` (inclusive).
pub fn ensure_in_range(field: &str, value: f64, min: f64, max: f64) -> DomainResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(DomainError::invalid_parameter(
            field,
            format!("must be within [{min}, {max}] (got {value})"),
        ));
    }
    Ok(())
}

/// Require a whole number no larger than `max`.
pub fn ensure_at_most(field: &str, value: u32, max: u32) -> DomainResult<()> {
    if value > max {
        return Err(DomainError::invalid_parameter(
            field,
            format!("must be at most {max} (got {value})"),
        ));
    }
    Ok(())
}

/// Require a non-blank string.
pub fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_parameter(field, "must not be empty"));
    }
    Ok(())
}
