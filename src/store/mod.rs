//! In-memory persistence layer for compiled queries.

mod collection;
mod errors;
mod sorter;

pub use collection::{load_collections, Collection};
pub use errors::{StoreError, StoreResult};
pub use sorter::ResultSorter;
