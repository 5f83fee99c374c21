//! Domain error model.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic failures raised while building or evolving domain values.
///
/// Stock shortages and missing line items are not here; the cart has its own
/// error type for outcomes a user can cause. Anything in this enum means the
/// data itself is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value is malformed, e.g. a line item with a zero amount.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A collection-level rule broke, e.g. the same product listed twice.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
