//! HTTP API route definitions.

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_secret, get_secret, health, list_secrets, method_not_allowed, not_found, ready,
    render_metrics, AppState,
};
use crate::metrics;

/// Collection endpoint: all messages.
pub const COLLECTION_PATH: &str = "/secrets";
/// Item endpoint: one message by `id` query parameter.
pub const ITEM_PATH: &str = "/secret";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Secret endpoints
        .route(
            COLLECTION_PATH,
            get(list_secrets)
                .post(create_secret)
                .fallback(method_not_allowed),
        )
        .route(
            ITEM_PATH,
            get(get_secret)
                .post(create_secret)
                .fallback(method_not_allowed),
        )
        // Health endpoints
        .route("/health", get(health).fallback(method_not_allowed))
        .route("/ready", get(ready).fallback(method_not_allowed))
        // Metrics endpoint
        .route("/metrics", get(render_metrics).fallback(method_not_allowed))
        // Only matched routes are counted, keeping the route label bounded
        .route_layer(middleware::from_fn(track_requests))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn track_requests(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;
    metrics::inc_http_requests(route, response.status().as_u16());
    response
}
