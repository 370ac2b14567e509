//! # Compiled Predicates
//!
//! Output of the filter compiler: a conjunction of typed per-field
//! predicates plus an optional ordering. The persistence layer consumes
//! these; [`CompiledPredicate::matches`] is the reference evaluation over
//! JSON documents.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::clause::SortDirection;
use super::dates::parse_instant;
use crate::schema::FieldPath;

/// String match modes. Both sides are compared lower-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatch {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    NotEquals,
}

impl TextMatch {
    /// `actual` and `needle` must already be lower-cased
    fn test(&self, actual: &str, needle: &str) -> bool {
        match self {
            TextMatch::Equals => actual == needle,
            TextMatch::Contains => actual.contains(needle),
            TextMatch::StartsWith => actual.starts_with(needle),
            TextMatch::EndsWith => actual.ends_with(needle),
            TextMatch::NotEquals => actual != needle,
        }
    }
}

/// Ordered comparison against one or two bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison<T> {
    Eq(T),
    Ne(T),
    Gt(T),
    Lt(T),
    /// Inclusive on both ends. `low > high` matches nothing.
    Between(T, T),
}

impl<T: PartialOrd> Comparison<T> {
    pub fn test(&self, actual: &T) -> bool {
        match self {
            Comparison::Eq(v) => actual == v,
            Comparison::Ne(v) => actual != v,
            Comparison::Gt(v) => actual > v,
            Comparison::Lt(v) => actual < v,
            Comparison::Between(low, high) => actual >= low && actual <= high,
        }
    }
}

/// A single typed field condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    Text {
        field: FieldPath,
        op: TextMatch,
        /// Lower-cased operand
        value: String,
    },
    Timestamp {
        field: FieldPath,
        cmp: Comparison<DateTime<Utc>>,
    },
    Integer {
        field: FieldPath,
        cmp: Comparison<i64>,
    },
}

impl Predicate {
    /// Field this predicate addresses
    pub fn field(&self) -> &FieldPath {
        match self {
            Predicate::Text { field, .. }
            | Predicate::Timestamp { field, .. }
            | Predicate::Integer { field, .. } => field,
        }
    }

    /// Evaluates against a stored document.
    ///
    /// A missing, null or wrongly typed field never matches, not even
    /// for the negated operators.
    pub fn matches(&self, document: &Value) -> bool {
        let actual = match self.field().lookup(document) {
            Some(v) if !v.is_null() => v,
            _ => return false,
        };

        match self {
            Predicate::Text { op, value, .. } => actual
                .as_str()
                .is_some_and(|s| op.test(&s.to_lowercase(), value)),
            Predicate::Timestamp { cmp, .. } => {
                stored_instant(actual).is_some_and(|instant| cmp.test(&instant))
            }
            Predicate::Integer { cmp, .. } => actual.as_i64().is_some_and(|n| cmp.test(&n)),
        }
    }
}

/// Reads a stored timestamp: RFC 3339 first, then the filter value formats.
pub(crate) fn stored_instant(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?;
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| parse_instant(s).ok())
}

/// Conjunction of predicates. Empty means "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompiledPredicate {
    predicates: Vec<Predicate>,
}

impl CompiledPredicate {
    /// The predicate that matches every document
    pub fn match_all() -> Self {
        Self::default()
    }

    /// AND another predicate onto this one
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Check if a document matches all predicates
    pub fn matches(&self, document: &Value) -> bool {
        self.predicates.iter().all(|p| p.matches(document))
    }
}

/// How sort values are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Raw JSON ordering
    #[default]
    Value,
    /// Stored timestamps compared as UTC instants
    Instant,
}

/// Sort instruction for the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    /// Dotted path; not checked against the schema
    pub field: String,
    pub direction: SortDirection,
    /// `Instant` only when `field` resolves to a timestamp
    pub key: SortKey,
}

/// Predicate plus optional ordering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    pub predicate: CompiledPredicate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortSpec>,
}
