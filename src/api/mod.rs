//! HTTP API module for secret message, health, and metrics endpoints.

pub mod handlers;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::{create_router, COLLECTION_PATH, ITEM_PATH};
