//! querygate - typed dynamic filters for collection queries
//!
//! Compiles loosely-typed filter clauses into typed predicates against
//! entity schemas, and serves them over a small REST surface.

pub mod cli;
pub mod config;
pub mod filter;
pub mod observability;
pub mod rest_api;
pub mod schema;
pub mod store;
