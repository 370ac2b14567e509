//! Schema registry for loading entity schemas from disk at startup
//!
//! - Schemas stored as `<schema_dir>/*.json`
//! - One file per entity
//! - Malformed files and duplicate entities fail the load

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::resolver::{FieldPath, FieldResolver, ResolvedField};
use super::types::EntitySchema;

/// In-memory registry of entity schemas.
///
/// Immutable once loaded; shared read-only across request handlers.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Loaded schemas indexed by entity name
    schemas: HashMap<String, EntitySchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads all schema files from `schema_dir`.
    ///
    /// A missing directory is an error: a registry without schemas cannot
    /// resolve any filter.
    pub fn load_dir(schema_dir: &Path) -> SchemaResult<Self> {
        let mut registry = Self::new();

        let entries = fs::read_dir(schema_dir).map_err(|e| {
            SchemaError::malformed_schema(
                schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            paths.push(path);
        }

        // Deterministic load order so duplicate errors are reproducible
        paths.sort();
        for path in &paths {
            registry.load_schema_file(path)?;
        }

        tracing::debug!(
            dir = %schema_dir.display(),
            entities = registry.schema_count(),
            "loaded entity schemas"
        );

        Ok(registry)
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let schema: EntitySchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), e))?;

        self.insert(schema)
    }

    /// Registers a schema directly (for testing or programmatic creation).
    pub fn register(&mut self, schema: EntitySchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema("<in-memory>", e))?;

        self.insert(schema)
    }

    fn insert(&mut self, schema: EntitySchema) -> SchemaResult<()> {
        if self.schemas.contains_key(&schema.entity) {
            return Err(SchemaError::duplicate_entity(&schema.entity));
        }

        self.schemas.insert(schema.entity.clone(), schema);
        Ok(())
    }

    /// Gets a schema by entity name.
    pub fn get(&self, entity: &str) -> Option<&EntitySchema> {
        self.schemas.get(entity)
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl FieldResolver for SchemaRegistry {
    fn resolve(&self, entity: &str, path: &FieldPath) -> SchemaResult<ResolvedField> {
        self.get(entity)
            .ok_or_else(|| SchemaError::unknown_entity(entity))?
            .resolve_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::SchemaErrorCode;
    use crate::schema::types::{FieldDef, SemanticType};
    use tempfile::TempDir;

    fn sample_schema() -> EntitySchema {
        let mut fields = HashMap::new();
        fields.insert("id".into(), FieldDef::integer_id());
        fields.insert("name".into(), FieldDef::string());
        EntitySchema::new("users", fields)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(sample_schema()).unwrap();

        let schema = registry.get("users");
        assert!(schema.is_some());
        assert_eq!(schema.unwrap().entity, "users");
        assert!(registry.get("users").is_some());
    }

    #[test]
    fn test_duplicate_entity() {
        let mut registry = SchemaRegistry::new();
        registry.register(sample_schema()).unwrap();

        let result = registry.register(sample_schema());
        assert_eq!(result.unwrap_err().code(), SchemaErrorCode::DuplicateEntity);
    }

    #[test]
    fn test_load_dir() {
        let temp_dir = TempDir::new().unwrap();
        let content = serde_json::to_string(&sample_schema()).unwrap();
        fs::write(temp_dir.path().join("users.json"), content).unwrap();
        fs::write(temp_dir.path().join("README.txt"), "not a schema").unwrap();

        let registry = SchemaRegistry::load_dir(temp_dir.path()).unwrap();
        assert_eq!(registry.schema_count(), 1);
        assert!(registry.get("users").is_some());
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();

        let err = SchemaRegistry::load_dir(temp_dir.path()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedSchema);
        assert!(err.message().contains("broken.json"));
    }

    #[test]
    fn test_load_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        assert!(SchemaRegistry::load_dir(&missing).is_err());
    }

    #[test]
    fn test_resolve_via_trait() {
        let mut registry = SchemaRegistry::new();
        registry.register(sample_schema()).unwrap();

        let path = FieldPath::parse("id").unwrap();
        let resolved = registry.resolve("users", &path).unwrap();
        assert_eq!(resolved.semantic_type, SemanticType::IntegerId);

        let err = registry.resolve("orders", &path).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::UnknownEntity);
    }
}
