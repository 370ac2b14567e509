//! # REST API Module
//!
//! HTTP endpoint for filtered collection queries:
//!
//! - `POST /collections/:collection/query` with a filter request body
//! - `GET /health`

pub mod errors;
pub mod handler;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use handler::QueryHandler;
pub use response::{HealthResponse, ListResponse};
pub use server::RestServer;
