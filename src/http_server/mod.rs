//! # HTTP Server Module
//!
//! JSON endpoint over the translator.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/query` - Translate a phrase and render its SQL
//! - `GET /observability/metrics` - Translation counters

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod query_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use query_routes::{QueryRequest, QueryState};
pub use server::HttpServer;
