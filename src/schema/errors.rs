//! Schema error types
//!
//! Error codes:
//! - QG_UNKNOWN_ENTITY
//! - QG_UNKNOWN_FIELD
//! - QG_NOT_AN_OBJECT
//! - QG_EMPTY_PATH
//! - QG_MALFORMED_SCHEMA
//! - QG_DUPLICATE_ENTITY

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Entity has no registered schema
    UnknownEntity,
    /// A path segment does not exist on the traversed type
    UnknownField,
    /// A non-terminal path segment is not an object
    NotAnObject,
    /// Path is empty or contains an empty segment
    EmptyPath,
    /// Schema file could not be read or parsed
    MalformedSchema,
    /// Two schemas declare the same entity
    DuplicateEntity,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownEntity => "QG_UNKNOWN_ENTITY",
            SchemaErrorCode::UnknownField => "QG_UNKNOWN_FIELD",
            SchemaErrorCode::NotAnObject => "QG_NOT_AN_OBJECT",
            SchemaErrorCode::EmptyPath => "QG_EMPTY_PATH",
            SchemaErrorCode::MalformedSchema => "QG_MALFORMED_SCHEMA",
            SchemaErrorCode::DuplicateEntity => "QG_DUPLICATE_ENTITY",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with context
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
}

impl SchemaError {
    /// Create an unknown entity error
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::UnknownEntity,
            message: format!("Entity '{}' has no schema", entity.into()),
        }
    }

    /// Create an unknown field error for the segment that failed to resolve
    pub fn unknown_field(entity: impl Into<String>, segment: &str, path: &str) -> Self {
        Self {
            code: SchemaErrorCode::UnknownField,
            message: format!(
                "Field '{}' does not exist on '{}' (path '{}')",
                segment,
                entity.into(),
                path
            ),
        }
    }

    /// Create a not-an-object error for a segment that cannot be traversed
    pub fn not_an_object(
        entity: impl Into<String>,
        segment: &str,
        type_name: &str,
        path: &str,
    ) -> Self {
        Self {
            code: SchemaErrorCode::NotAnObject,
            message: format!(
                "Field '{}' on '{}' is of type {} and has no nested fields (path '{}')",
                segment,
                entity.into(),
                type_name,
                path
            ),
        }
    }

    /// Create an empty path error
    pub fn empty_path(path: &str) -> Self {
        Self {
            code: SchemaErrorCode::EmptyPath,
            message: format!("Field path '{}' is empty or has an empty segment", path),
        }
    }

    /// Create an error for a malformed schema file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: format!("Malformed schema file '{}': {}", path.into(), reason.into()),
        }
    }

    /// Create a duplicate entity error
    pub fn duplicate_entity(entity: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::DuplicateEntity,
            message: format!("Entity '{}' is already registered", entity.into()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
