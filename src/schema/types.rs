//! Entity schema type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - integer_id: 64-bit signed integer identifier
//! - timestamp: UTC instant, stored as an RFC 3339 string
//! - bool: Boolean
//! - float: 64-bit floating point
//! - object: Nested object with field schema
//!
//! Only string, integer_id and timestamp are filterable. The rest resolve to
//! [`SemanticType::Unsupported`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Field types as declared in an entity schema file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer identifier
    IntegerId,
    /// UTC timestamp
    Timestamp,
    /// Boolean
    Bool,
    /// 64-bit floating point
    Float,
    /// Nested object with its own field schema
    Object {
        /// Nested field definitions
        fields: HashMap<String, FieldDef>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::IntegerId => "integer_id",
            FieldType::Timestamp => "timestamp",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
            FieldType::Object { .. } => "object",
        }
    }

    /// Maps the declared type onto the closed set the filter compiler
    /// dispatches on.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            FieldType::String => SemanticType::String,
            FieldType::IntegerId => SemanticType::IntegerId,
            FieldType::Timestamp => SemanticType::Timestamp,
            other => SemanticType::Unsupported(other.type_name()),
        }
    }
}

/// Domain-level type used to choose comparison semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    String,
    Timestamp,
    IntegerId,
    /// Any other declared type, carrying its name
    Unsupported(&'static str),
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::String => write!(f, "string"),
            SemanticType::Timestamp => write!(f, "timestamp"),
            SemanticType::IntegerId => write!(f, "integer_id"),
            SemanticType::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
}

impl FieldDef {
    pub fn string() -> Self {
        FieldType::String.into()
    }

    pub fn integer_id() -> Self {
        FieldType::IntegerId.into()
    }

    pub fn timestamp() -> Self {
        FieldType::Timestamp.into()
    }

    pub fn boolean() -> Self {
        FieldType::Bool.into()
    }

    /// Create a nested object field
    pub fn object(fields: HashMap<String, FieldDef>) -> Self {
        FieldType::Object { fields }.into()
    }
}

impl From<FieldType> for FieldDef {
    fn from(field_type: FieldType) -> Self {
        Self { field_type }
    }
}

/// Schema of one entity, as loaded from `<schema_dir>/<file>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Entity name, also the collection name
    pub entity: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-level field definitions
    pub fields: HashMap<String, FieldDef>,
}

impl EntitySchema {
    /// Create a new schema
    pub fn new(entity: impl Into<String>, fields: HashMap<String, FieldDef>) -> Self {
        Self {
            entity: entity.into(),
            description: None,
            fields,
        }
    }

    /// Validates the schema structure itself
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.entity.trim().is_empty() {
            return Err("Schema must name its entity".into());
        }
        validate_field_names(&self.fields)
    }
}

fn validate_field_names(fields: &HashMap<String, FieldDef>) -> Result<(), String> {
    for (name, def) in fields {
        if name.is_empty() || name.contains('.') {
            return Err(format!("Invalid field name '{}'", name));
        }
        if let FieldType::Object { fields: nested } = &def.field_type {
            validate_field_names(nested)?;
        }
    }
    Ok(())
}
