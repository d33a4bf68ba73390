//! Persistence for secret messages.
//!
//! This module handles:
//! - The `SecretMessage` row type
//! - The `MessageStore` trait handlers depend on
//! - A Postgres-backed store and an in-memory store for testing

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;

pub use memory::MemoryMessageStore;
pub use postgres::PgMessageStore;

/// A persisted secret message.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SecretMessage {
    /// Server-assigned identifier.
    pub id: i64,
    /// Message text as supplied at creation.
    pub message: String,
}

/// Access to the `secret_message` table.
///
/// Each method issues exactly one statement.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Returns every stored message, ordered by id.
    async fn list_all(&self) -> Result<Vec<SecretMessage>, StoreError>;

    /// Returns the message with the given id, if any.
    async fn get_by_id(&self, id: i64) -> Result<Option<SecretMessage>, StoreError>;

    /// Stores a new message and returns its assigned id.
    async fn insert(&self, message: &str) -> Result<i64, StoreError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Creates the `secret_message` table if it does not exist.
    async fn ensure_schema(&self) -> Result<(), StoreError>;
}
