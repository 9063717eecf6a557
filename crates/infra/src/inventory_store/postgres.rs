//! Postgres-backed inventory store.
//!
//! Each inventory is one row; the full document is kept as JSONB next to the
//! columns the store needs to look it up (`id`, `share_token`, `created_at`).
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `AlreadyExists` on insert, `Storage` otherwise |
//! | Database (other) | Any other | `Storage` |
//! | PoolClosed | N/A | `Storage` |
//! | Other | N/A | `Storage` |
//!
//! ## Atomicity
//!
//! `execute()` runs inside one transaction and locks the target row with
//! `SELECT ... FOR UPDATE` before deciding, so concurrent commands against the
//! same document are applied one after another.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{Span, instrument};

use propinv_core::Aggregate;
use propinv_inventory::{Inventory, InventoryCommand, InventoryId, ShareToken};

use super::r#trait::{InventoryKey, InventoryStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS inventories (
    id UUID PRIMARY KEY,
    share_token TEXT UNIQUE,
    document JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

/// Postgres-backed inventory store.
///
/// Uses SQLx connection pool which is thread-safe (Arc + Send + Sync).
#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: Arc<PgPool>,
}

impl PostgresInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url` and make sure the table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

fn to_document(inventory: &Inventory) -> Result<JsonValue, StoreError> {
    serde_json::to_value(inventory).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn from_row(row: &sqlx::postgres::PgRow) -> Result<Inventory, StoreError> {
    let document: JsonValue = row
        .try_get("document")
        .map_err(|e| StoreError::Serialization(format!("failed to read document column: {e}")))?;
    serde_json::from_value(document)
        .map_err(|e| StoreError::Serialization(format!("failed to deserialize inventory: {e}")))
}

#[async_trait::async_trait]
impl InventoryStore for PostgresInventoryStore {
    #[instrument(skip(self, inventory), fields(inventory_id = %inventory.id_typed()), err)]
    async fn insert(&self, inventory: Inventory) -> Result<Inventory, StoreError> {
        let document = to_document(&inventory)?;

        sqlx::query(
            r#"
            INSERT INTO inventories (id, share_token, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(inventory.id_typed().0.as_uuid())
        .bind(inventory.shareable_link().map(ShareToken::as_str))
        .bind(&document)
        .bind(inventory.created_at())
        .bind(inventory.updated_at())
        .execute(&*self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::AlreadyExists(inventory.id_typed())
            } else {
                map_sqlx_error("insert_inventory", e)
            }
        })?;

        Ok(inventory)
    }

    #[instrument(skip(self), fields(inventory_id = %id), err)]
    async fn get(&self, id: InventoryId) -> Result<Option<Inventory>, StoreError> {
        let row = sqlx::query("SELECT document FROM inventories WHERE id = $1")
            .bind(id.0.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_inventory", e))?;

        row.as_ref().map(from_row).transpose()
    }

    #[instrument(skip(self, token), err)]
    async fn get_by_token(&self, token: &ShareToken) -> Result<Option<Inventory>, StoreError> {
        let row = sqlx::query("SELECT document FROM inventories WHERE share_token = $1")
            .bind(token.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_inventory_by_token", e))?;

        row.as_ref().map(from_row).transpose()
    }

    #[instrument(skip(self), fields(inventory_count = tracing::field::Empty), err)]
    async fn list(&self, limit: usize) -> Result<Vec<Inventory>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            "SELECT document FROM inventories ORDER BY created_at ASC, id ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_inventories", e))?;

        let inventories = rows.iter().map(from_row).collect::<Result<Vec<_>, _>>()?;
        Span::current().record("inventory_count", inventories.len());
        Ok(inventories)
    }

    #[instrument(skip(self, command), fields(key = %key, command = command.name()), err)]
    async fn execute(
        &self,
        key: &InventoryKey,
        command: &InventoryCommand,
    ) -> Result<Option<Inventory>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let row = match key {
            InventoryKey::Id(id) => {
                sqlx::query("SELECT document FROM inventories WHERE id = $1 FOR UPDATE")
                    .bind(id.0.as_uuid())
                    .fetch_optional(&mut *tx)
                    .await
            }
            InventoryKey::Token(token) => {
                sqlx::query("SELECT document FROM inventories WHERE share_token = $1 FOR UPDATE")
                    .bind(token.as_str())
                    .fetch_optional(&mut *tx)
                    .await
            }
        }
        .map_err(|e| map_sqlx_error("lock_inventory", e))?;

        let Some(row) = row else {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Ok(None);
        };

        let mut inventory = from_row(&row)?;
        if let Err(rejection) = inventory.execute(command) {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(rejection.into());
        }

        let document = to_document(&inventory)?;
        sqlx::query(
            r#"
            UPDATE inventories
            SET share_token = $2, document = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(inventory.id_typed().0.as_uuid())
        .bind(inventory.shareable_link().map(ShareToken::as_str))
        .bind(&document)
        .bind(inventory.updated_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_inventory", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(Some(inventory))
    }

    #[instrument(skip(self), fields(inventory_id = %id), err)]
    async fn delete(&self, id: InventoryId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM inventories WHERE id = $1")
            .bind(id.0.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_inventory", e))?;
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Storage(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            StoreError::Storage(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Storage(format!("sqlx error in {}: {}", operation, err)),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
