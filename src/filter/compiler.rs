//! # Filter Compiler
//!
//! Turns a caller-supplied clause list into a [`CompiledQuery`]:
//!
//! 1. Absent list compiles to "match all"
//! 2. Each clause: completeness check, field resolution, type dispatch
//! 3. Predicates are ANDed in input order
//! 4. Ordering is attached when both field and a recognized direction are
//!    given; other directions are ignored. A field that resolves to a
//!    timestamp sorts by instant.
//!
//! Compilation is fail-fast: the first bad clause aborts with its error.

use super::clause::{FilterClause, FilterRequest, SortDirection};
use super::denylist::Denylist;
use super::dispatch::build_predicate;
use super::errors::{FilterError, FilterResult};
use super::predicate::{CompiledPredicate, CompiledQuery, Predicate, SortKey, SortSpec};
use crate::schema::{FieldPath, FieldResolver, SemanticType};

/// Stateless compiler over a field resolver
pub struct FilterCompiler<'a, R: FieldResolver + ?Sized> {
    resolver: &'a R,
    denylist: Option<&'a Denylist>,
}

impl<'a, R: FieldResolver + ?Sized> FilterCompiler<'a, R> {
    /// Create a compiler with an empty denylist
    pub fn new(resolver: &'a R) -> Self {
        Self {
            resolver,
            denylist: None,
        }
    }

    /// Strip clauses on these fields before compiling requests
    pub fn with_denylist(mut self, denylist: &'a Denylist) -> Self {
        self.denylist = Some(denylist);
        self
    }

    /// Compiles a wire request, applying the denylist first.
    ///
    /// Denylisted clauses are dropped, and so is ordering on a denylisted
    /// field.
    pub fn compile_request(
        &self,
        entity: &str,
        request: &FilterRequest,
    ) -> FilterResult<CompiledQuery> {
        let (clauses, order_by) = match self.denylist {
            Some(denylist) => {
                let order_by = request.order_by.as_deref().filter(|field| {
                    let denied = denylist.contains(field);
                    if denied {
                        tracing::debug!(field, "dropping ordering on denylisted field");
                    }
                    !denied
                });
                (denylist.strip(request.filters.as_deref()), order_by)
            }
            None => (request.filters.clone(), request.order_by.as_deref()),
        };

        self.compile(
            entity,
            clauses.as_deref(),
            order_by,
            request.order_direction.as_deref(),
        )
    }

    /// Compiles clauses and ordering for `entity`.
    ///
    /// The denylist is not applied here; see [`Self::compile_request`].
    pub fn compile(
        &self,
        entity: &str,
        clauses: Option<&[FilterClause]>,
        order_by: Option<&str>,
        order_direction: Option<&str>,
    ) -> FilterResult<CompiledQuery> {
        let mut predicate = CompiledPredicate::match_all();

        for clause in clauses.unwrap_or_default() {
            predicate = predicate.and(self.compile_clause(entity, clause)?);
        }

        tracing::debug!(
            entity,
            predicates = predicate.predicates().len(),
            "compiled filter"
        );

        Ok(CompiledQuery {
            predicate,
            order: self.order_spec(entity, order_by, order_direction),
        })
    }

    fn compile_clause(&self, entity: &str, clause: &FilterClause) -> FilterResult<Predicate> {
        let (operator, value) = match (clause.operator, clause.value.as_deref()) {
            (Some(operator), Some(value)) if clause.is_complete() => (operator, value),
            _ => {
                return Err(FilterError::invalid(format!(
                    "Clause on '{}' must have field, operator and value",
                    clause.field
                )))
            }
        };

        let path = FieldPath::parse(&clause.field)?;
        let resolved = self.resolver.resolve(entity, &path)?;

        tracing::trace!(
            entity,
            field = %path,
            operator = %operator,
            semantic_type = %resolved.semantic_type,
            "dispatching filter clause"
        );

        build_predicate(resolved, operator, value, clause.other_value.as_deref())
    }

    fn order_spec(
        &self,
        entity: &str,
        order_by: Option<&str>,
        order_direction: Option<&str>,
    ) -> Option<SortSpec> {
        let field = order_by.filter(|f| !f.is_empty())?;
        let direction = order_direction?;

        match SortDirection::parse(direction) {
            Some(direction) => Some(SortSpec {
                field: field.to_string(),
                direction,
                key: self.sort_key(entity, field),
            }),
            None => {
                tracing::debug!(field, direction, "ignoring unrecognized order direction");
                None
            }
        }
    }

    /// Unresolvable order fields fall back to raw value ordering.
    fn sort_key(&self, entity: &str, field: &str) -> SortKey {
        let resolved = FieldPath::parse(field)
            .ok()
            .and_then(|path| self.resolver.resolve(entity, &path).ok());

        match resolved.map(|r| r.semantic_type) {
            Some(SemanticType::Timestamp) => SortKey::Instant,
            _ => SortKey::Value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::clause::FilterOperator;
    use crate::schema::{EntitySchema, FieldDef, SchemaRegistry};
    use serde_json::json;
    use std::collections::HashMap;

    fn registry() -> SchemaRegistry {
        let mut fields = HashMap::new();
        fields.insert("id".into(), FieldDef::integer_id());
        fields.insert("username".into(), FieldDef::string());
        fields.insert("password".into(), FieldDef::string());
        fields.insert("createdAt".into(), FieldDef::timestamp());

        let mut registry = SchemaRegistry::new();
        registry.register(EntitySchema::new("users", fields)).unwrap();
        registry
    }

    #[test]
    fn test_absent_clauses_match_all() {
        let registry = registry();
        let compiler = FilterCompiler::new(&registry);

        let query = compiler.compile("users", None, None, None).unwrap();
        assert!(query.predicate.is_match_all());
        assert_eq!(query.order, None);
    }

    #[test]
    fn test_empty_clauses_match_all() {
        let registry = registry();
        let compiler = FilterCompiler::new(&registry);

        let clauses: Vec<FilterClause> = Vec::new();
        let query = compiler
            .compile("users", Some(clauses.as_slice()), None, None)
            .unwrap();
        assert!(query.predicate.is_match_all());
    }

    #[test]
    fn test_ordering_without_filters() {
        let registry = registry();
        let compiler = FilterCompiler::new(&registry);

        let query = compiler
            .compile("users", None, Some("username"), Some("DESC"))
            .unwrap();
        assert_eq!(
            query.order,
            Some(SortSpec {
                field: "username".into(),
                direction: SortDirection::Desc,
                key: SortKey::Value,
            })
        );
    }

    #[test]
    fn test_unrecognized_direction_ignored() {
        let registry = registry();
        let compiler = FilterCompiler::new(&registry);

        let query = compiler
            .compile("users", None, Some("username"), Some("sideways"))
            .unwrap();
        assert_eq!(query.order, None);

        let query = compiler.compile("users", None, Some("username"), None).unwrap();
        assert_eq!(query.order, None);

        let query = compiler.compile("users", None, None, Some("asc")).unwrap();
        assert_eq!(query.order, None);
    }

    #[test]
    fn test_fail_fast_on_first_bad_clause() {
        let registry = registry();
        let compiler = FilterCompiler::new(&registry);

        let clauses = vec![
            FilterClause::new("username", FilterOperator::Equals, "ada"),
            FilterClause::new("id", FilterOperator::Contains, "1"),
            FilterClause::new("nickname", FilterOperator::Equals, "x"),
        ];

        match compiler.compile("users", Some(clauses.as_slice()), None, None) {
            Err(FilterError::InvalidFilter(msg)) => assert!(msg.contains("CONTAINS")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_is_invalid_filter() {
        let registry = registry();
        let compiler = FilterCompiler::new(&registry);

        let clauses = vec![FilterClause::new("nickname", FilterOperator::Equals, "x")];
        assert!(matches!(
            compiler.compile("users", Some(clauses.as_slice()), None, None),
            Err(FilterError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_request_applies_denylist() {
        let registry = registry();
        let denylist = Denylist::new(["password"]);
        let compiler = FilterCompiler::new(&registry).with_denylist(&denylist);

        let request = FilterRequest {
            filters: Some(vec![
                FilterClause::new("password", FilterOperator::Equals, "hunter2"),
                FilterClause::new("username", FilterOperator::Equals, "ada"),
            ]),
            ..Default::default()
        };

        let query = compiler.compile_request("users", &request).unwrap();
        assert_eq!(query.predicate.predicates().len(), 1);
        assert!(query.predicate.matches(&json!({"username": "Ada", "password": "x"})));
    }

    #[test]
    fn test_timestamp_order_sorts_by_instant() {
        let registry = registry();
        let compiler = FilterCompiler::new(&registry);

        let key = |field| {
            compiler
                .compile("users", None, Some(field), Some("asc"))
                .unwrap()
                .order
                .map(|o| o.key)
        };

        assert_eq!(key("createdAt"), Some(SortKey::Instant));
        assert_eq!(key("id"), Some(SortKey::Value));
        assert_eq!(key("nickname"), Some(SortKey::Value));
    }

    #[test]
    fn test_request_drops_denylisted_ordering() {
        let registry = registry();
        let denylist = Denylist::new(["password"]);
        let compiler = FilterCompiler::new(&registry).with_denylist(&denylist);

        let request = FilterRequest {
            order_by: Some("password".into()),
            order_direction: Some("asc".into()),
            ..Default::default()
        };
        assert_eq!(compiler.compile_request("users", &request).unwrap().order, None);

        let request = FilterRequest {
            order_by: Some("username".into()),
            ..request
        };
        assert!(compiler.compile_request("users", &request).unwrap().order.is_some());
    }
}
