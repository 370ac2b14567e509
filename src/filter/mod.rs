//! # Dynamic Filter Compiler
//!
//! Compiles loosely-typed caller filter clauses into typed predicates
//! against entity schemas whose field types are only known at resolution
//! time.
//!
//! Flow: denylist → per clause (completeness → field resolution → type
//! dispatch) → conjunction + ordering.

pub mod clause;
pub mod compiler;
pub mod dates;
pub mod denylist;
pub mod dispatch;
pub mod errors;
pub mod predicate;

pub use clause::{FilterClause, FilterOperator, FilterRequest, SortDirection};
pub use compiler::FilterCompiler;
pub use dates::parse_instant;
pub use denylist::{without_field, Denylist};
pub use errors::{FilterError, FilterResult};
pub use predicate::{
    Comparison, CompiledPredicate, CompiledQuery, Predicate, SortKey, SortSpec, TextMatch,
};
