//! Secret message service.
//!
//! A small HTTP service that stores free-form text messages in a single
//! Postgres table and reads them back.
//!
//! ```text
//! POST /secrets  {"message":"hello"}  ->  201 {"id":1,"message":"hello"}
//! GET  /secrets                       ->  200 [{"id":1,"message":"hello"}]
//! GET  /secret?id=1                   ->  200 {"id":1,"message":"hello"}
//! GET  /secret?id=2                   ->  404 {"error":"not found"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Message persistence (Postgres and in-memory)
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError, StoreError};
