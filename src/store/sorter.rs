//! Result sorting for compiled queries
//!
//! Stable sort by one (possibly nested) field. Missing values come first
//! ascending and last descending.

use std::cmp::Ordering;

use serde_json::Value;

use crate::filter::predicate::stored_instant;
use crate::filter::{SortDirection, SortKey, SortSpec};
use crate::schema::FieldPath;

/// Sorts result documents
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts documents by the requested field and direction.
    ///
    /// Sort is stable. An order field that is not a valid path leaves the
    /// input order untouched.
    pub fn sort(documents: &mut [Value], sort_spec: &SortSpec) {
        let path = match FieldPath::parse(&sort_spec.field) {
            Ok(path) => path,
            Err(_) => return,
        };

        documents.sort_by(|a, b| {
            let (a, b) = (path.lookup(a), path.lookup(b));
            let ordering = match sort_spec.key {
                SortKey::Value => Self::compare_values(a, b),
                // Unparseable timestamps rank with missing ones
                SortKey::Instant => a.and_then(stored_instant).cmp(&b.and_then(stored_instant)),
            };

            match sort_spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Compares two JSON values for sorting.
    ///
    /// Ordering rules:
    /// - missing < null < bool < number < string
    /// - For same types, natural ordering
    fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => {
                let type_order = |v: &Value| -> u8 {
                    match v {
                        Value::Null => 0,
                        Value::Bool(_) => 1,
                        Value::Number(_) => 2,
                        Value::String(_) => 3,
                        Value::Array(_) => 4,
                        Value::Object(_) => 5,
                    }
                };

                let a_type = type_order(a_val);
                let b_type = type_order(b_val);

                if a_type != b_type {
                    return a_type.cmp(&b_type);
                }

                match (a_val, b_val) {
                    (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                    (Value::Number(a_n), Value::Number(b_n)) => {
                        match (a_n.as_i64(), b_n.as_i64()) {
                            (Some(a_i), Some(b_i)) => a_i.cmp(&b_i),
                            _ => {
                                let a_f = a_n.as_f64().unwrap_or(0.0);
                                let b_f = b_n.as_f64().unwrap_or(0.0);
                                a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                            }
                        }
                    }
                    (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
                    _ => Ordering::Equal, // nulls, arrays and objects not compared
                }
            }
        }
    }
}
