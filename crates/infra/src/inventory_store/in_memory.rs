use std::collections::HashMap;
use std::sync::RwLock;

use propinv_core::Aggregate;
use propinv_inventory::{Inventory, InventoryCommand, InventoryId, ShareToken};

use super::r#trait::{InventoryKey, InventoryStore, StoreError};

/// In-memory inventory store for tests/dev.
///
/// `execute` holds the write lock from lookup to write-back, which is what
/// makes concurrent submissions against one token safe.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<HashMap<InventoryId, Inventory>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Storage("lock poisoned".to_string())
}

fn resolve<'a>(
    map: &'a mut HashMap<InventoryId, Inventory>,
    key: &InventoryKey,
) -> Option<&'a mut Inventory> {
    match key {
        InventoryKey::Id(id) => map.get_mut(id),
        InventoryKey::Token(token) => map
            .values_mut()
            .find(|inv| inv.shareable_link() == Some(token)),
    }
}

#[async_trait::async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn insert(&self, inventory: Inventory) -> Result<Inventory, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let id = inventory.id_typed();
        if map.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        map.insert(id, inventory.clone());
        Ok(inventory)
    }

    async fn get(&self, id: InventoryId) -> Result<Option<Inventory>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    async fn get_by_token(&self, token: &ShareToken) -> Result<Option<Inventory>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map
            .values()
            .find(|inv| inv.shareable_link() == Some(token))
            .cloned())
    }

    async fn list(&self, limit: usize) -> Result<Vec<Inventory>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let mut all: Vec<Inventory> = map.values().cloned().collect();
        all.sort_by_key(|inv| (inv.created_at(), *inv.id_typed().0.as_uuid()));
        all.truncate(limit);
        Ok(all)
    }

    async fn execute(
        &self,
        key: &InventoryKey,
        command: &InventoryCommand,
    ) -> Result<Option<Inventory>, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let Some(current) = resolve(&mut map, key) else {
            return Ok(None);
        };

        // Work on a copy so a rejected command never leaves partial state behind.
        let mut next = current.clone();
        next.execute(command)?;
        *current = next.clone();
        Ok(Some(next))
    }

    async fn delete(&self, id: InventoryId) -> Result<u64, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(u64::from(map.remove(&id).is_some()))
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use propinv_core::DomainError;
    use propinv_inventory::{
        HealthSafety, IssueShareLink, LockSignature, NewInventory, PropertyOverview,
        SignerRole, SubmitSignature,
    };
    use std::sync::Arc;

    fn new_inventory(address: &str) -> Inventory {
        Inventory::new(
            InventoryId::generate(),
            NewInventory {
                property_overview: PropertyOverview {
                    address: address.to_string(),
                    property_type: "Residential".to_string(),
                    landlord_name: "Landlord".to_string(),
                    tenant_names: vec!["Tenant".to_string()],
                    inspection_date: "2024-01-15".to_string(),
                    general_description: String::new(),
                    property_photos: vec![],
                },
                health_safety: HealthSafety::default(),
                rooms: vec![],
                photo_vault: vec![],
            },
            Utc::now(),
        )
    }

    fn submit(name: &str) -> InventoryCommand {
        InventoryCommand::SubmitSignature(SubmitSignature {
            signer_name: name.to_string(),
            signer_role: SignerRole::Tenant,
            signature_data: "sig".to_string(),
            ip_address: String::new(),
            email: String::new(),
            tenant_present: None,
            occurred_at: Utc::now(),
        })
    }

    async fn shared(store: &InMemoryInventoryStore, address: &str) -> (InventoryId, ShareToken) {
        let inv = store.insert(new_inventory(address)).await.unwrap();
        let token = ShareToken::generate();
        store
            .execute(
                &InventoryKey::Id(inv.id_typed()),
                &InventoryCommand::IssueShareLink(IssueShareLink {
                    token: token.clone(),
                    occurred_at: Utc::now(),
                }),
            )
            .await
            .unwrap()
            .unwrap();
        (inv.id_typed(), token)
    }

    #[tokio::test]
    async fn insert_get_and_delete() {
        let store = InMemoryInventoryStore::new();
        let inv = store.insert(new_inventory("1 Main St")).await.unwrap();

        let fetched = store.get(inv.id_typed()).await.unwrap().unwrap();
        assert_eq!(fetched, inv);

        assert_eq!(store.delete(inv.id_typed()).await.unwrap(), 1);
        assert_eq!(store.delete(inv.id_typed()).await.unwrap(), 0);
        assert!(store.get(inv.id_typed()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryInventoryStore::new();
        let inv = store.insert(new_inventory("1 Main St")).await.unwrap();
        let err = store.insert(inv).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let store = InMemoryInventoryStore::new();
        for i in 0..5 {
            store.insert(new_inventory(&format!("{i} Main St"))).await.unwrap();
        }
        assert_eq!(store.list(3).await.unwrap().len(), 3);
        assert_eq!(store.list(100).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn reissued_token_replaces_old_one() {
        let store = InMemoryInventoryStore::new();
        let (id, old) = shared(&store, "1 Main St").await;

        let new = ShareToken::generate();
        store
            .execute(
                &InventoryKey::Id(id),
                &InventoryCommand::IssueShareLink(IssueShareLink {
                    token: new.clone(),
                    occurred_at: Utc::now(),
                }),
            )
            .await
            .unwrap();

        assert!(store.get_by_token(&old).await.unwrap().is_none());
        assert_eq!(store.get_by_token(&new).await.unwrap().unwrap().id_typed(), id);
    }

    #[tokio::test]
    async fn execute_on_unknown_key_returns_none() {
        let store = InMemoryInventoryStore::new();
        let result = store
            .execute(&InventoryKey::Token(ShareToken::generate()), &submit("A"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn rejected_command_leaves_document_untouched() {
        let store = InMemoryInventoryStore::new();
        let (_, token) = shared(&store, "1 Main St").await;
        let key = InventoryKey::Token(token.clone());

        store.execute(&key, &submit("First")).await.unwrap();
        store
            .execute(
                &key,
                &InventoryCommand::LockSignature(LockSignature {
                    occurred_at: Utc::now(),
                }),
            )
            .await
            .unwrap();
        let before = store.get_by_token(&token).await.unwrap().unwrap();

        let err = store.execute(&key, &submit("Late")).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(DomainError::Forbidden(_))));
        assert_eq!(store.get_by_token(&token).await.unwrap().unwrap(), before);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_submissions_are_not_lost() {
        let store = Arc::new(InMemoryInventoryStore::new());
        let (_, token) = shared(&store, "1 Main St").await;

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            let key = InventoryKey::Token(token.clone());
            handles.push(tokio::spawn(async move {
                store.execute(&key, &submit(&format!("Signer {i}"))).await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let inv = store.get_by_token(&token).await.unwrap().unwrap();
        assert_eq!(inv.signature_count(), 32);
    }
}
