//! Field denylist
//!
//! Strips clauses on fields callers must never filter by (credential
//! fields and the like). Stripped clauses are dropped, not rejected.

use std::collections::HashSet;

use super::clause::FilterClause;

/// Set of field names excluded from caller-driven filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Denylist {
    fields: HashSet<String>,
}

impl Denylist {
    /// Create a denylist from field names
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `field` is denied (exact match)
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Returns a copy of `clauses` without the denied clauses.
    ///
    /// The caller's list is left untouched. An absent list stays absent.
    pub fn strip(&self, clauses: Option<&[FilterClause]>) -> Option<Vec<FilterClause>> {
        clauses.map(|clauses| {
            clauses
                .iter()
                .filter(|clause| {
                    let denied = self.contains(&clause.field);
                    if denied {
                        tracing::debug!(field = %clause.field, "dropping denylisted filter clause");
                    }
                    !denied
                })
                .cloned()
                .collect()
        })
    }
}

/// Returns a copy of `clauses` without every clause on `field`.
pub fn without_field(clauses: Option<&[FilterClause]>, field: &str) -> Option<Vec<FilterClause>> {
    Denylist::new([field]).strip(clauses)
}
