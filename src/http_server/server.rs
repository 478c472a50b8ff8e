//! # HTTP Server
//!
//! Combines the health, query and observability routers behind one listener.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use super::query_routes::{query_routes, QueryState};
use crate::observability::{log_event, log_event_with_fields, Event, MetricsRegistry};
use crate::render::TableBinding;

/// HTTP server for phrase translation
pub struct HttpServer {
    config: HttpServerConfig,
    metrics: Arc<MetricsRegistry>,
    router: Router,
}

impl HttpServer {
    /// Server rendering against `binding`
    pub fn with_config(config: HttpServerConfig, binding: TableBinding) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        let router = Self::build_router(&config, binding, Arc::clone(&metrics));
        Self {
            config,
            metrics,
            router,
        }
    }

    fn build_router(
        config: &HttpServerConfig,
        binding: TableBinding,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let query_state = Arc::new(QueryState::new(binding, Arc::clone(&metrics)));

        let origins = if config.cors_origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(config.cors_origins.iter().filter_map(|s| s.parse().ok()))
        };
        let cors = CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes())
            .nest("/api", query_routes(query_state))
            .nest("/observability", observability_routes(metrics))
            .layer(cors)
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serves until ctrl-c
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = addr.to_string();
        log_event_with_fields(Event::ServerStart, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;

        log_event(Event::ServerStop);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        HttpServer::with_config(
            HttpServerConfig::default(),
            TableBinding::new("ratings.csv", "/data/ratings.csv"),
        )
    }

    async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_query(body: &str) -> Request<Body> {
        Request::post("/api/query")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_socket_addr() {
        let server = HttpServer::with_config(
            HttpServerConfig::default().with_port(8080),
            TableBinding::default(),
        );
        assert_eq!(server.socket_addr(), "127.0.0.1:8080");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(
            server().router(),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_query_route() {
        let (status, body) = call(
            server().router(),
            post_query(r#"{"query": "Movies from 2024"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["rule"], "from_year");
        assert_eq!(body["params"], json!([2024]));
    }

    #[tokio::test]
    async fn test_empty_query_is_bad_request() {
        let (status, body) = call(server().router(), post_query(r#"{"query": ""}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "No query provided");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, body) = call(server().router(), post_query("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_metrics_shared_with_query_route() {
        let server = server();
        let metrics = server.metrics();
        let router = server.router();

        call(router.clone(), post_query(r#"{"query": "average rating"}"#)).await;
        let (status, body) = call(
            router,
            Request::get("/observability/metrics").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translations"], 1);
        assert_eq!(metrics.snapshot().plans, 1);
    }
}
