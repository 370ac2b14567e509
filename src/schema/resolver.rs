//! Field metadata resolution
//!
//! Translates a dotted path such as `details.firstName` into a typed,
//! addressable field. Resolution walks one segment at a time: every segment
//! but the last must name an object field.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{EntitySchema, FieldType, SemanticType};

/// A parsed dotted field path. Never empty, no empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dotted path.
    pub fn parse(path: &str) -> SchemaResult<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();

        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(SchemaError::empty_path(path));
        }

        Ok(Self { segments })
    }

    /// Returns the path segments in traversal order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Looks the field up in a stored JSON document.
    ///
    /// Returns `None` when any segment is missing or an intermediate value
    /// is not an object.
    pub fn lookup<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| current.get(segment))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Output of metadata resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Type used to pick comparison semantics
    pub semantic_type: SemanticType,
    /// Accessor for the persistence layer
    pub path: FieldPath,
}

/// Resolves field paths against entity metadata.
///
/// Implementations must be side-effect free; the filter compiler may call
/// them from any number of request tasks at once.
pub trait FieldResolver {
    /// Resolves `path` on `entity`, failing if any segment does not exist on
    /// the type it is looked up on.
    fn resolve(&self, entity: &str, path: &FieldPath) -> SchemaResult<ResolvedField>;
}

impl EntitySchema {
    /// Walks `path` segment by segment through nested object fields.
    pub fn resolve_path(&self, path: &FieldPath) -> SchemaResult<ResolvedField> {
        let mut fields = &self.fields;
        let last = path.segments().len() - 1;

        for (depth, segment) in path.segments().iter().enumerate() {
            let def = fields.get(segment).ok_or_else(|| {
                SchemaError::unknown_field(&self.entity, segment, &path.to_string())
            })?;

            if depth == last {
                return Ok(ResolvedField {
                    semantic_type: def.field_type.semantic_type(),
                    path: path.clone(),
                });
            }

            match &def.field_type {
                FieldType::Object { fields: nested } => fields = nested,
                other => {
                    return Err(SchemaError::not_an_object(
                        &self.entity,
                        segment,
                        other.type_name(),
                        &path.to_string(),
                    ))
                }
            }
        }

        Err(SchemaError::empty_path(&path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::SchemaErrorCode;
    use crate::schema::types::FieldDef;
    use serde_json::json;
    use std::collections::HashMap;

    fn users_schema() -> EntitySchema {
        let mut details = HashMap::new();
        details.insert("firstName".into(), FieldDef::string());
        details.insert("birthDate".into(), FieldDef::timestamp());

        let mut fields = HashMap::new();
        fields.insert("id".into(), FieldDef::integer_id());
        fields.insert("username".into(), FieldDef::string());
        fields.insert("active".into(), FieldDef::boolean());
        fields.insert("details".into(), FieldDef::object(details));

        EntitySchema::new("users", fields)
    }

    #[test]
    fn test_parse_path() {
        let path = FieldPath::parse("details.firstName").unwrap();
        assert_eq!(path.segments(), ["details", "firstName"]);
        assert_eq!(path.to_string(), "details.firstName");
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for bad in ["", ".", "details.", ".firstName", "a..b"] {
            let err = FieldPath::parse(bad).unwrap_err();
            assert_eq!(err.code(), SchemaErrorCode::EmptyPath, "path {:?}", bad);
        }
    }

    #[test]
    fn test_resolve_top_level() {
        let path = FieldPath::parse("username").unwrap();
        let resolved = users_schema().resolve_path(&path).unwrap();
        assert_eq!(resolved.semantic_type, SemanticType::String);
        assert_eq!(resolved.path, path);
    }

    #[test]
    fn test_resolve_nested() {
        let path = FieldPath::parse("details.birthDate").unwrap();
        let resolved = users_schema().resolve_path(&path).unwrap();
        assert_eq!(resolved.semantic_type, SemanticType::Timestamp);
    }

    #[test]
    fn test_resolve_unsupported_type_is_not_an_error() {
        let path = FieldPath::parse("active").unwrap();
        let resolved = users_schema().resolve_path(&path).unwrap();
        assert_eq!(resolved.semantic_type, SemanticType::Unsupported("bool"));
    }

    #[test]
    fn test_resolve_unknown_segment() {
        let path = FieldPath::parse("details.nickname").unwrap();
        let err = users_schema().resolve_path(&path).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::UnknownField);
        assert!(err.message().contains("nickname"));
    }

    #[test]
    fn test_resolve_through_scalar() {
        let path = FieldPath::parse("username.length").unwrap();
        let err = users_schema().resolve_path(&path).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::NotAnObject);
    }

    #[test]
    fn test_lookup_in_document() {
        let doc = json!({"details": {"firstName": "Ada"}, "username": "ada"});

        let path = FieldPath::parse("details.firstName").unwrap();
        assert_eq!(path.lookup(&doc), Some(&json!("Ada")));

        let path = FieldPath::parse("username.first").unwrap();
        assert_eq!(path.lookup(&doc), None);

        let path = FieldPath::parse("details.lastName").unwrap();
        assert_eq!(path.lookup(&doc), None);
    }

    #[test]
    fn test_path_serializes_dotted() {
        let path = FieldPath::parse("details.firstName").unwrap();
        assert_eq!(serde_json::to_value(&path).unwrap(), json!("details.firstName"));
    }
}
