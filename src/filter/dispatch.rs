//! Type dispatch
//!
//! Picks the predicate construction for a resolved field from its semantic
//! type and the clause operator.
//!
//! | type       | operators                                            |
//! |------------|------------------------------------------------------|
//! | string     | EQUALS CONTAINS STARTS_WITH ENDS_WITH NOT_EQUALS      |
//! | timestamp  | EQUALS GREATER_THAN LESS_THAN BETWEEN NOT_EQUALS      |
//! | integer_id | EQUALS GREATER_THAN LESS_THAN BETWEEN NOT_EQUALS      |

use super::clause::FilterOperator;
use super::dates::parse_instant;
use super::errors::{FilterError, FilterResult};
use super::predicate::{Comparison, Predicate, TextMatch};
use crate::schema::{FieldPath, ResolvedField, SemanticType};

/// Builds the predicate for one complete clause on a resolved field.
pub fn build_predicate(
    resolved: ResolvedField,
    operator: FilterOperator,
    value: &str,
    other_value: Option<&str>,
) -> FilterResult<Predicate> {
    let ResolvedField {
        semantic_type,
        path,
    } = resolved;

    match semantic_type {
        SemanticType::String => {
            let op = text_match(operator)
                .ok_or_else(|| unsupported_operator(&path, operator, semantic_type))?;
            Ok(Predicate::Text {
                field: path,
                op,
                value: value.to_lowercase(),
            })
        }
        SemanticType::Timestamp => {
            let cmp = comparison(&path, semantic_type, operator, value, other_value, |v| {
                parse_instant(v)
            })?;
            Ok(Predicate::Timestamp { field: path, cmp })
        }
        SemanticType::IntegerId => {
            let cmp = comparison(&path, semantic_type, operator, value, other_value, |v| {
                parse_integer(&path, v)
            })?;
            Ok(Predicate::Integer { field: path, cmp })
        }
        SemanticType::Unsupported(type_name) => Err(FilterError::invalid(format!(
            "Field '{}' of type {} cannot be filtered",
            path, type_name
        ))),
    }
}

fn text_match(operator: FilterOperator) -> Option<TextMatch> {
    match operator {
        FilterOperator::Equals => Some(TextMatch::Equals),
        FilterOperator::Contains => Some(TextMatch::Contains),
        FilterOperator::StartsWith => Some(TextMatch::StartsWith),
        FilterOperator::EndsWith => Some(TextMatch::EndsWith),
        FilterOperator::NotEquals => Some(TextMatch::NotEquals),
        FilterOperator::GreaterThan | FilterOperator::LessThan | FilterOperator::Between => None,
    }
}

/// Ordered comparison shared by timestamps and integer ids.
fn comparison<T, F>(
    path: &FieldPath,
    semantic_type: SemanticType,
    operator: FilterOperator,
    value: &str,
    other_value: Option<&str>,
    parse: F,
) -> FilterResult<Comparison<T>>
where
    F: Fn(&str) -> FilterResult<T>,
{
    let cmp = match operator {
        FilterOperator::Equals => Comparison::Eq(parse(value)?),
        FilterOperator::NotEquals => Comparison::Ne(parse(value)?),
        FilterOperator::GreaterThan => Comparison::Gt(parse(value)?),
        FilterOperator::LessThan => Comparison::Lt(parse(value)?),
        FilterOperator::Between => {
            let other = other_value.filter(|o| !o.is_empty()).ok_or_else(|| {
                FilterError::invalid(format!("BETWEEN on '{}' requires otherValue", path))
            })?;
            Comparison::Between(parse(value)?, parse(other)?)
        }
        FilterOperator::Contains | FilterOperator::StartsWith | FilterOperator::EndsWith => {
            return Err(unsupported_operator(path, operator, semantic_type))
        }
    };

    Ok(cmp)
}

fn parse_integer(path: &FieldPath, value: &str) -> FilterResult<i64> {
    value.parse::<i64>().map_err(|e| {
        FilterError::invalid(format!(
            "'{}' is not an integer for field '{}': {}",
            value, path, e
        ))
    })
}

fn unsupported_operator(
    path: &FieldPath,
    operator: FilterOperator,
    semantic_type: SemanticType,
) -> FilterError {
    FilterError::invalid(format!(
        "Operator {} is not supported on {} field '{}'",
        operator, semantic_type, path
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn resolved(path: &str, semantic_type: SemanticType) -> ResolvedField {
        ResolvedField {
            semantic_type,
            path: FieldPath::parse(path).unwrap(),
        }
    }

    #[test]
    fn test_string_value_is_lowercased() {
        let pred = build_predicate(
            resolved("username", SemanticType::String),
            FilterOperator::Contains,
            "UsEr",
            None,
        )
        .unwrap();

        match pred {
            Predicate::Text { op, value, .. } => {
                assert_eq!(op, TextMatch::Contains);
                assert_eq!(value, "user");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_string_rejects_ordered_operators() {
        for op in [
            FilterOperator::GreaterThan,
            FilterOperator::LessThan,
            FilterOperator::Between,
        ] {
            let result = build_predicate(
                resolved("username", SemanticType::String),
                op,
                "a",
                Some("b"),
            );
            assert!(matches!(result, Err(FilterError::InvalidFilter(_))), "{}", op);
        }
    }

    #[test]
    fn test_integer_rejects_substring_operators() {
        for op in [
            FilterOperator::Contains,
            FilterOperator::StartsWith,
            FilterOperator::EndsWith,
        ] {
            let result = build_predicate(resolved("id", SemanticType::IntegerId), op, "1", None);
            assert!(matches!(result, Err(FilterError::InvalidFilter(_))), "{}", op);
        }
    }

    #[test]
    fn test_timestamp_rejects_substring_operators() {
        let result = build_predicate(
            resolved("createdAt", SemanticType::Timestamp),
            FilterOperator::StartsWith,
            "2024-07-16",
            None,
        );
        assert!(matches!(result, Err(FilterError::InvalidFilter(_))));
    }

    #[test]
    fn test_integer_between() {
        let pred = build_predicate(
            resolved("id", SemanticType::IntegerId),
            FilterOperator::Between,
            "3",
            Some("7"),
        )
        .unwrap();

        assert_eq!(
            pred,
            Predicate::Integer {
                field: FieldPath::parse("id").unwrap(),
                cmp: Comparison::Between(3, 7),
            }
        );
    }

    #[test]
    fn test_between_requires_other_value() {
        for other in [None, Some("")] {
            let result = build_predicate(
                resolved("id", SemanticType::IntegerId),
                FilterOperator::Between,
                "3",
                other,
            );
            assert!(matches!(result, Err(FilterError::InvalidFilter(_))));

            let result = build_predicate(
                resolved("createdAt", SemanticType::Timestamp),
                FilterOperator::Between,
                "2024-07-16",
                other,
            );
            assert!(matches!(result, Err(FilterError::InvalidFilter(_))));
        }
    }

    #[test]
    fn test_integer_parse_failure_is_invalid_filter() {
        let result = build_predicate(
            resolved("id", SemanticType::IntegerId),
            FilterOperator::Equals,
            "abc",
            None,
        );
        match result {
            Err(FilterError::InvalidFilter(msg)) => assert!(msg.contains("abc")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_timestamp_parse_failure_is_invalid_date_format() {
        let result = build_predicate(
            resolved("createdAt", SemanticType::Timestamp),
            FilterOperator::GreaterThan,
            "16-07-2024",
            None,
        );
        assert!(matches!(result, Err(FilterError::InvalidDateFormat(_))));
    }

    #[test]
    fn test_timestamp_comparison() {
        let pred = build_predicate(
            resolved("createdAt", SemanticType::Timestamp),
            FilterOperator::LessThan,
            "2024-07-16T10:00:00",
            None,
        )
        .unwrap();

        let expected = Utc.with_ymd_and_hms(2024, 7, 16, 10, 0, 0).unwrap();
        assert_eq!(
            pred,
            Predicate::Timestamp {
                field: FieldPath::parse("createdAt").unwrap(),
                cmp: Comparison::Lt(expected),
            }
        );
    }

    #[test]
    fn test_unsupported_type() {
        let result = build_predicate(
            resolved("active", SemanticType::Unsupported("bool")),
            FilterOperator::Equals,
            "true",
            None,
        );
        match result {
            Err(FilterError::InvalidFilter(msg)) => assert!(msg.contains("bool")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
