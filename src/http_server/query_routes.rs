//! Query HTTP Routes
//!
//! `POST /query` translates a phrase and returns the plan with its rendered
//! SQL. Execution against the dataset happens elsewhere.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use crate::observability::{log_event_with_fields, log_translation, Event, MetricsRegistry};
use crate::render::{QueryReport, SqlRenderer, TableBinding};
use crate::translator::{Translation, Translator};

// ==================
// Shared State
// ==================

/// Translator, renderer and counters shared across requests
pub struct QueryState {
    pub translator: Translator,
    pub renderer: SqlRenderer,
    pub metrics: Arc<MetricsRegistry>,
}

impl QueryState {
    pub fn new(binding: TableBinding, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            translator: Translator::new(binding.logical_name()),
            renderer: SqlRenderer::new(binding),
            metrics,
        }
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    /// When false the query is forwarded as raw SQL
    #[serde(default = "default_natural_language")]
    pub natural_language: bool,
}

fn default_natural_language() -> bool {
    true
}

// ==================
// Routes
// ==================

pub fn query_routes(state: Arc<QueryState>) -> Router {
    Router::new()
        .route("/query", post(query_handler))
        .with_state(state)
}

pub async fn query_handler(
    State(state): State<Arc<QueryState>>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> ApiResult<Json<QueryReport>> {
    let Json(request) = body.map_err(|e| reject(&state, ApiError::InvalidBody(e.body_text())))?;

    if request.query.trim().is_empty() {
        return Err(reject(&state, ApiError::EmptyQuery));
    }

    let translation = if request.natural_language {
        state.translator.translate(&request.query)
    } else {
        Translation::Passthrough {
            text: request.query.clone(),
        }
    };

    state.metrics.record(&translation);
    log_translation(&request.query, &translation);

    Ok(Json(QueryReport::new(&translation, &state.renderer)))
}

fn reject(state: &QueryState, error: ApiError) -> ApiError {
    state.metrics.increment_rejected_requests();
    let reason = error.to_string();
    log_event_with_fields(Event::RequestRejected, &[("reason", reason.as_str())]);
    error
}
