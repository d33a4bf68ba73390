//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::metrics;
use crate::store::MessageStore;

use super::types::{HealthResponse, ItemQuery, ReadyResponse, SecretRequest, SecretResponse};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Message persistence.
    pub store: Arc<dyn MessageStore>,
    /// Prometheus exposition handle.
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Create new app state.
    pub fn new(store: Arc<dyn MessageStore>, metrics: PrometheusHandle) -> Self {
        Self { store, metrics }
    }
}

/// List every stored message. Always 200, possibly with an empty array.
pub async fn list_secrets(
    State(state): State<AppState>,
) -> Result<Json<Vec<SecretResponse>>, ApiError> {
    let rows = state.store.list_all().await?;
    Ok(Json(rows.into_iter().map(SecretResponse::from).collect()))
}

/// Fetch one message by the `id` query parameter.
pub async fn get_secret(
    State(state): State<AppState>,
    query: Result<Query<ItemQuery>, QueryRejection>,
) -> Result<Json<SecretResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let raw = query
        .id
        .ok_or_else(|| ApiError::BadRequest("missing id query parameter".to_string()))?;

    // A non-numeric id can never have been assigned.
    let Ok(id) = raw.parse::<i64>() else {
        debug!(id = %raw, "Non-numeric id requested");
        return Err(ApiError::NotFound);
    };

    match state.store.get_by_id(id).await? {
        Some(row) => Ok(Json(row.into())),
        None => Err(ApiError::NotFound),
    }
}

/// Store a new message and echo it back with its id.
pub async fn create_secret(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.map_err(|rejection| {
        warn!("Rejected create body: {}", rejection.body_text());
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    })?;
    let request: SecretRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected create request: {}", e);
        ApiError::BadRequest(format!("invalid JSON body: {}", e))
    })?;

    let id = state.store.insert(&request.message).await?;
    metrics::inc_secrets_created();

    let response = SecretResponse {
        id,
        message: request.message,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if the store answers, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(ReadyResponse { ready: true })),
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse { ready: false }),
            )
        }
    }
}

/// Prometheus text exposition.
pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
