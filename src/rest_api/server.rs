//! # REST API HTTP Server
//!
//! Axum-based HTTP server for collection queries.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::errors::RestResult;
use super::handler::QueryHandler;
use super::response::{HealthResponse, ListResponse};
use crate::filter::FilterRequest;

/// Shared state type
type ServerState = Arc<QueryHandler>;

/// REST API server
pub struct RestServer {
    handler: Arc<QueryHandler>,
    cors_origins: Vec<HeaderValue>,
}

impl RestServer {
    pub fn new(handler: QueryHandler) -> Self {
        Self {
            handler: Arc::new(handler),
            cors_origins: Vec::new(),
        }
    }

    /// Restrict CORS to these origins; empty allows any
    pub fn with_cors_origins(mut self, origins: Vec<HeaderValue>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let cors = if self.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(self.cors_origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .route("/collections/:collection/query", post(query_handler))
            .with_state(self.handler)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Bind and serve until the process is stopped
    pub async fn serve(self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "querygate listening");

        axum::serve(listener, self.router()).await
    }
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Filtered list handler
async fn query_handler(
    State(handler): State<ServerState>,
    Path(collection): Path<String>,
    body: Result<Json<FilterRequest>, JsonRejection>,
) -> RestResult<Json<ListResponse<Value>>> {
    let Json(request) = body?;
    let results = handler.query(&collection, &request)?;
    Ok(Json(ListResponse::new(results)))
}
