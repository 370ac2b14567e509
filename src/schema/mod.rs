//! Entity field metadata
//!
//! Entity schemas declare typed, possibly nested fields. The filter compiler
//! consumes them through [`FieldResolver`], which turns a dotted path into a
//! [`ResolvedField`].

mod errors;
mod loader;
mod resolver;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaRegistry;
pub use resolver::{FieldPath, FieldResolver, ResolvedField};
pub use types::{EntitySchema, FieldDef, FieldType, SemanticType};
