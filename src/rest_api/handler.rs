//! # Query Handler
//!
//! Compiles a filter request and runs it against a collection.

use std::collections::HashMap;

use serde_json::Value;

use super::errors::{RestError, RestResult};
use crate::filter::{Denylist, FilterCompiler, FilterRequest};
use crate::schema::SchemaRegistry;
use crate::store::Collection;

/// Read-only state shared by all request tasks
#[derive(Debug, Clone, Default)]
pub struct QueryHandler {
    registry: SchemaRegistry,
    denylist: Denylist,
    collections: HashMap<String, Collection>,
}

impl QueryHandler {
    pub fn new(
        registry: SchemaRegistry,
        denylist: Denylist,
        collections: HashMap<String, Collection>,
    ) -> Self {
        Self {
            registry,
            denylist,
            collections,
        }
    }

    /// Compile `request` for `collection` and return the matching documents.
    pub fn query(&self, collection: &str, request: &FilterRequest) -> RestResult<Vec<Value>> {
        let documents = self
            .collections
            .get(collection)
            .ok_or_else(|| RestError::CollectionNotFound(collection.to_string()))?;

        let compiled = FilterCompiler::new(&self.registry)
            .with_denylist(&self.denylist)
            .compile_request(collection, request)?;

        let results = documents.query(&compiled);
        tracing::debug!(
            collection,
            matched = results.len(),
            total = documents.len(),
            "query executed"
        );

        Ok(results)
    }
}
