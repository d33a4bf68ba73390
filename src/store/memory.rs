//! In-memory message store.
//!
//! Used by unit tests and by `--in-memory` runs where no database is
//! available. Ids are assigned from a counter starting at 1, mirroring a
//! `BIGSERIAL` column.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreError;

use super::{MessageStore, SecretMessage};

/// In-memory message store.
#[derive(Debug, Clone)]
pub struct MemoryMessageStore {
    rows: Arc<DashMap<i64, String>>,
    next_id: Arc<AtomicI64>,
    failing: Arc<AtomicBool>,
}

impl MemoryMessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no messages are stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store set to fail".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn list_all(&self) -> Result<Vec<SecretMessage>, StoreError> {
        self.check()?;
        let mut rows: Vec<SecretMessage> = self
            .rows
            .iter()
            .map(|entry| SecretMessage {
                id: *entry.key(),
                message: entry.value().clone(),
            })
            .collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<SecretMessage>, StoreError> {
        self.check()?;
        Ok(self.rows.get(&id).map(|entry| SecretMessage {
            id,
            message: entry.value().clone(),
        }))
    }

    async fn insert(&self, message: &str) -> Result<i64, StoreError> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows.insert(id, message.to_string());
        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.check()
    }
}
