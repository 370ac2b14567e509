//! # Filter Errors
//!
//! Error types for filter compilation. Every variant is a caller-input
//! error and aborts the whole compilation.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Filter compilation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Clause is incomplete, the operator does not apply to the field type,
    /// the field does not resolve, or a value cannot be parsed
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Timestamp value matches none of the accepted formats
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
}

impl FilterError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            FilterError::InvalidFilter(_) => "FILTER_INVALID",
            FilterError::InvalidDateFormat(_) => "FILTER_INVALID_DATE_FORMAT",
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FilterError::InvalidFilter(message.into())
    }
}

impl From<SchemaError> for FilterError {
    fn from(err: SchemaError) -> Self {
        FilterError::InvalidFilter(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(FilterError::invalid("x").code(), "FILTER_INVALID");
        assert_eq!(
            FilterError::InvalidDateFormat("x".into()).code(),
            "FILTER_INVALID_DATE_FORMAT"
        );
    }

    #[test]
    fn test_resolution_failure_folds_into_invalid_filter() {
        let err: FilterError = SchemaError::unknown_entity("orders").into();
        match err {
            FilterError::InvalidFilter(msg) => assert!(msg.contains("orders")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
