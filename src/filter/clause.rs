//! # Filter Clause Model
//!
//! Caller-supplied filter instructions, as they arrive on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    NotEquals,
    GreaterThan,
    LessThan,
    /// Inclusive range, needs `otherValue`
    Between,
}

impl FilterOperator {
    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "EQUALS",
            FilterOperator::Contains => "CONTAINS",
            FilterOperator::StartsWith => "STARTS_WITH",
            FilterOperator::EndsWith => "ENDS_WITH",
            FilterOperator::NotEquals => "NOT_EQUALS",
            FilterOperator::GreaterThan => "GREATER_THAN",
            FilterOperator::LessThan => "LESS_THAN",
            FilterOperator::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One caller-supplied condition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    /// Dotted path into the entity, e.g. `details.firstName`
    #[serde(default)]
    pub field: String,

    /// Comparison operator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<FilterOperator>,

    /// Value to compare against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Upper bound, only read for `BETWEEN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_value: Option<String>,
}

impl FilterClause {
    /// Create a new clause
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: Some(operator),
            value: Some(value.into()),
            other_value: None,
        }
    }

    /// Create a `BETWEEN` clause
    pub fn between(
        field: impl Into<String>,
        low: impl Into<String>,
        high: impl Into<String>,
    ) -> Self {
        Self::new(field, FilterOperator::Between, low).with_other_value(high)
    }

    /// Set the second operand
    pub fn with_other_value(mut self, other: impl Into<String>) -> Self {
        self.other_value = Some(other.into());
        self
    }

    /// A clause is complete when field, operator and value are all present
    /// and the strings are nonempty.
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty()
            && self.operator.is_some()
            && self.value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive match on `asc` / `desc`. Anything else is `None`.
    pub fn parse(direction: &str) -> Option<Self> {
        if direction.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if direction.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }
}

/// Filter request body accepted by the REST and CLI surfaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    /// Clause list; absent means "match all"
    #[serde(default)]
    pub filters: Option<Vec<FilterClause>>,

    /// Field to order by
    #[serde(default)]
    pub order_by: Option<String>,

    /// `asc` or `desc`, case-insensitive
    #[serde(default)]
    pub order_direction: Option<String>,
}
