//! Postgres-backed message store.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::StoreError;
use crate::metrics;

use super::{MessageStore, SecretMessage};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS secret_message (\
    id BIGSERIAL PRIMARY KEY, \
    message TEXT NOT NULL\
)";

/// Message store over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    /// Connect a pool using the database settings in `config`.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        info!(
            "Connecting to postgres at {}:{}/{}",
            config.db_host, config.db_port, config.db_name
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_with(config.connect_options())
            .await?;

        Ok(Self { pool })
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn list_all(&self) -> Result<Vec<SecretMessage>, StoreError> {
        let start = Instant::now();
        let rows = sqlx::query_as::<_, SecretMessage>(
            "SELECT id, message FROM secret_message ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        metrics::record_store_latency(start, "list_all");

        debug!("Listed {} secret messages", rows.len());
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<SecretMessage>, StoreError> {
        let start = Instant::now();
        let row = sqlx::query_as::<_, SecretMessage>(
            "SELECT id, message FROM secret_message WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        metrics::record_store_latency(start, "get_by_id");

        Ok(row)
    }

    async fn insert(&self, message: &str) -> Result<i64, StoreError> {
        let start = Instant::now();
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO secret_message (message) VALUES ($1) RETURNING id",
        )
        .bind(message)
        .fetch_one(&self.pool)
        .await?;
        metrics::record_store_latency(start, "insert");

        debug!(id, "Inserted secret message");
        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!("Table secret_message is ready");
        Ok(())
    }
}
