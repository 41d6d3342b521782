//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures caused by what the caller
/// supplied (malformed input, out-of-range parameters, bad configuration).
/// Unknown items and missing containers are not errors; the engine has a
/// defined result for both.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A threshold, capacity or percentage was outside its sane range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Static configuration (category table, environment) was rejected at load time.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_detail() {
        let err = DomainError::invalid_parameter("capacity must be positive (got -1)");
        assert_eq!(
            err.to_string(),
            "invalid parameter: capacity must be positive (got -1)"
        );

        let err = DomainError::configuration("item 4151 is listed in both Combat and Skilling");
        assert!(err.to_string().starts_with("invalid configuration:"));
    }
}
