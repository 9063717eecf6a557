use std::sync::Arc;

use thiserror::Error;

use propinv_core::DomainError;
use propinv_inventory::{Inventory, InventoryCommand, InventoryId, ShareToken};

/// How a single inventory document is addressed by a mutation.
///
/// Owners address documents by id; signers only ever hold the share token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InventoryKey {
    Id(InventoryId),
    Token(ShareToken),
}

impl core::fmt::Display for InventoryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InventoryKey::Id(id) => write!(f, "id:{id}"),
            InventoryKey::Token(token) => write!(f, "token:{token}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The command was rejected by the document's lifecycle rules.
    #[error(transparent)]
    Rejected(#[from] DomainError),

    #[error("inventory already exists: {0}")]
    AlreadyExists(InventoryId),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Document store for inventories.
///
/// The store carries no business rules of its own. `execute` is the single
/// mutation path: implementations must load the document, run the command
/// through the aggregate and persist the result as one exclusive operation, so
/// concurrent commands against the same document serialise instead of
/// overwriting each other.
#[async_trait::async_trait]
pub trait InventoryStore: Send + Sync {
    /// Persist a newly created document.
    async fn insert(&self, inventory: Inventory) -> Result<Inventory, StoreError>;

    async fn get(&self, id: InventoryId) -> Result<Option<Inventory>, StoreError>;

    /// Resolve the document currently holding `token`. Replaced tokens resolve to nothing.
    async fn get_by_token(&self, token: &ShareToken) -> Result<Option<Inventory>, StoreError>;

    /// List documents, oldest first, at most `limit`.
    async fn list(&self, limit: usize) -> Result<Vec<Inventory>, StoreError>;

    /// Atomically apply `command` to the document addressed by `key`.
    ///
    /// Returns `Ok(None)` when the key does not resolve. A rejected command
    /// leaves the stored document untouched and surfaces as
    /// [`StoreError::Rejected`].
    async fn execute(
        &self,
        key: &InventoryKey,
        command: &InventoryCommand,
    ) -> Result<Option<Inventory>, StoreError>;

    /// Remove a document; returns the number of documents deleted (0 or 1).
    async fn delete(&self, id: InventoryId) -> Result<u64, StoreError>;

    /// Release backing resources. Called once at process shutdown.
    async fn close(&self);
}

#[async_trait::async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn insert(&self, inventory: Inventory) -> Result<Inventory, StoreError> {
        (**self).insert(inventory).await
    }

    async fn get(&self, id: InventoryId) -> Result<Option<Inventory>, StoreError> {
        (**self).get(id).await
    }

    async fn get_by_token(&self, token: &ShareToken) -> Result<Option<Inventory>, StoreError> {
        (**self).get_by_token(token).await
    }

    async fn list(&self, limit: usize) -> Result<Vec<Inventory>, StoreError> {
        (**self).list(limit).await
    }

    async fn execute(
        &self,
        key: &InventoryKey,
        command: &InventoryCommand,
    ) -> Result<Option<Inventory>, StoreError> {
        (**self).execute(key, command).await
    }

    async fn delete(&self, id: InventoryId) -> Result<u64, StoreError> {
        (**self).delete(id).await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
