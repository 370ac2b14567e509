//! In-memory document collections
//!
//! Reference persistence layer for compiled queries: filters with the
//! compiled predicate, then applies the sort instruction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::sorter::ResultSorter;
use crate::filter::CompiledQuery;

/// A set of JSON documents, keyed by entity name in the handler
#[derive(Debug, Clone, Default)]
pub struct Collection {
    documents: Vec<Value>,
}

impl Collection {
    /// Create a collection from documents
    pub fn new(documents: Vec<Value>) -> Self {
        Self { documents }
    }

    /// Loads a collection from a file holding a JSON array of objects.
    pub fn load_file(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let malformed = |reason: String| StoreError::Malformed {
            path: path.display().to_string(),
            reason,
        };

        let documents: Vec<Value> =
            serde_json::from_str(&content).map_err(|e| malformed(format!("Invalid JSON: {}", e)))?;

        if let Some(pos) = documents.iter().position(|doc| !doc.is_object()) {
            return Err(malformed(format!("Element {} is not an object", pos)));
        }

        Ok(Self::new(documents))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Runs a compiled query, returning copies of the matching documents.
    pub fn query(&self, query: &CompiledQuery) -> Vec<Value> {
        let mut results: Vec<Value> = self
            .documents
            .iter()
            .filter(|doc| query.predicate.matches(doc))
            .cloned()
            .collect();

        if let Some(order) = &query.order {
            ResultSorter::sort(&mut results, order);
        }

        results
    }
}

/// Loads every `<entity>.json` file in `data_dir` as a collection.
pub fn load_collections(data_dir: &Path) -> StoreResult<HashMap<String, Collection>> {
    let io_err = |source| StoreError::Io {
        path: data_dir.display().to_string(),
        source,
    };

    let mut collections = HashMap::new();

    for entry in fs::read_dir(data_dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();

        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }

        let name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        let collection = Collection::load_file(&path)?;
        tracing::debug!(collection = %name, documents = collection.len(), "loaded collection");
        collections.insert(name, collection);
    }

    Ok(collections)
}
