//! Signature lifecycle orchestration.
//!
//! `LifecycleManager` is the application-level entry point for everything that
//! changes an inventory: content updates, share links, signatures and locking.
//! It builds commands, hands them to the store's atomic `execute`, and maps the
//! outcome into a [`LifecycleError`]. The rules themselves live in the
//! `Inventory` aggregate; this module contains no IO of its own.
//!
//! ```text
//! request
//!   ↓
//! 1. Build command (server-assigned timestamps, fresh tokens)
//!   ↓
//! 2. store.execute(key, command)   -- load + handle + apply + persist, exclusive
//!   ↓
//! 3. Map result: None -> NotFound / InvalidLink, Rejected -> Forbidden / Validation
//! ```

use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument, warn};

use propinv_core::DomainError;
use propinv_inventory::{
    HealthSafety, Inventory, InventoryCommand, InventoryId, InventoryStatus, IssueShareLink,
    LockSignature, NewInventory, PropertyOverview, Room, ShareToken, Signature, SignerRole,
    SubmitSignature, UpdateContent, Verification,
};

use crate::inventory_store::{InventoryKey, InventoryStore, StoreError};

/// Default cap for [`LifecycleManager::list`].
pub const DEFAULT_LIST_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("inventory not found: {0}")]
    NotFound(InventoryId),

    /// The token does not resolve to any inventory (never issued, or replaced).
    #[error("invalid or expired link")]
    InvalidLink,

    /// Mutation attempted against a locked document.
    #[error("{0}")]
    Forbidden(String),

    #[error("document not signed")]
    NotSigned,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(#[source] StoreError),
}

impl From<DomainError> for LifecycleError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Forbidden(msg) => LifecycleError::Forbidden(msg),
            DomainError::NotSigned => LifecycleError::NotSigned,
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                LifecycleError::Validation(msg)
            }
        }
    }
}

impl From<StoreError> for LifecycleError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Rejected(domain) => domain.into(),
            other => LifecycleError::Store(other),
        }
    }
}

/// Partial content update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryUpdate {
    pub property_overview: Option<PropertyOverview>,
    pub health_safety: Option<HealthSafety>,
    pub rooms: Option<Vec<Room>>,
    pub status: Option<InventoryStatus>,
}

/// What a signer submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureInput {
    pub signer_name: String,
    pub signer_role: SignerRole,
    pub signature_data: String,
    pub email: Option<String>,
    pub tenant_present: Option<bool>,
    pub ip_address: Option<String>,
}

/// Result of issuing a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub token: ShareToken,
    /// Relative path recipients open to sign.
    pub shareable_link: String,
}

/// Confirmation returned after a signature is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureReceipt {
    pub verification_link: String,
    pub signature_count: usize,
    pub inventory: Inventory,
}

/// Orchestrates the inventory lifecycle over an [`InventoryStore`].
pub struct LifecycleManager<S> {
    store: S,
    list_limit: usize,
}

impl<S> LifecycleManager<S>
where
    S: InventoryStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    pub fn with_list_limit(mut self, list_limit: usize) -> Self {
        self.list_limit = list_limit;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip(self, content), fields(address = %content.property_overview.address), err)]
    pub async fn create(&self, content: NewInventory) -> Result<Inventory, LifecycleError> {
        let inventory = Inventory::new(InventoryId::generate(), content, Utc::now());
        let inventory = self.store.insert(inventory).await?;
        info!(inventory_id = %inventory.id_typed(), "inventory created");
        Ok(inventory)
    }

    pub async fn get(&self, id: InventoryId) -> Result<Inventory, LifecycleError> {
        self.store
            .get(id)
            .await?
            .ok_or(LifecycleError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Inventory>, LifecycleError> {
        Ok(self.store.list(self.list_limit).await?)
    }

    #[instrument(skip(self), fields(inventory_id = %id), err)]
    pub async fn delete(&self, id: InventoryId) -> Result<u64, LifecycleError> {
        match self.store.delete(id).await? {
            0 => Err(LifecycleError::NotFound(id)),
            deleted => {
                info!(deleted, "inventory deleted");
                Ok(deleted)
            }
        }
    }

    /// Merge the supplied content fields. Fails with `Forbidden` once the
    /// signature block is locked, whatever fields are supplied.
    #[instrument(skip(self, update), fields(inventory_id = %id), err)]
    pub async fn update_inventory(
        &self,
        id: InventoryId,
        update: InventoryUpdate,
    ) -> Result<Inventory, LifecycleError> {
        let command = InventoryCommand::UpdateContent(UpdateContent {
            property_overview: update.property_overview,
            health_safety: update.health_safety,
            rooms: update.rooms,
            status: update.status,
            occurred_at: Utc::now(),
        });

        self.run(InventoryKey::Id(id), command).await
    }

    /// Mint a new token for `id`, replacing any previous one, and mark it sent.
    #[instrument(skip(self), fields(inventory_id = %id), err)]
    pub async fn generate_link(&self, id: InventoryId) -> Result<ShareLink, LifecycleError> {
        let token = ShareToken::generate();
        let command = InventoryCommand::IssueShareLink(IssueShareLink {
            token: token.clone(),
            occurred_at: Utc::now(),
        });

        self.run(InventoryKey::Id(id), command).await?;
        info!("share link issued");

        Ok(ShareLink {
            shareable_link: token.sign_path(),
            token,
        })
    }

    pub async fn fetch_by_token(&self, token: &ShareToken) -> Result<Inventory, LifecycleError> {
        self.store
            .get_by_token(token)
            .await?
            .ok_or(LifecycleError::InvalidLink)
    }

    /// Append a signature entry. Never locks; see [`Self::lock`].
    #[instrument(
        skip(self, token, input),
        fields(signer_role = %input.signer_role),
        err
    )]
    pub async fn submit_signature(
        &self,
        token: &ShareToken,
        input: SignatureInput,
    ) -> Result<SignatureReceipt, LifecycleError> {
        if !input.signer_role.is_recognized() {
            warn!(role = %input.signer_role, "signature submitted with unrecognised role");
        }

        let command = InventoryCommand::SubmitSignature(SubmitSignature {
            signer_name: input.signer_name,
            signer_role: input.signer_role,
            signature_data: input.signature_data,
            ip_address: input.ip_address.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            tenant_present: input.tenant_present,
            occurred_at: Utc::now(),
        });

        let inventory = self.run(InventoryKey::Token(token.clone()), command).await?;
        let signature_count = inventory.signature_count();
        info!(
            inventory_id = %inventory.id_typed(),
            signature_count,
            "signature submitted"
        );

        Ok(SignatureReceipt {
            verification_link: token.verify_path(),
            signature_count,
            inventory,
        })
    }

    /// Freeze the signature block and, with it, the document's content.
    /// Locking an already locked document succeeds without changes.
    #[instrument(skip(self, token), err)]
    pub async fn lock(&self, token: &ShareToken) -> Result<Signature, LifecycleError> {
        let command = InventoryCommand::LockSignature(LockSignature {
            occurred_at: Utc::now(),
        });

        let inventory = self.run(InventoryKey::Token(token.clone()), command).await?;
        info!(inventory_id = %inventory.id_typed(), "signature locked");

        Ok(inventory.signature().cloned().unwrap_or_default())
    }

    /// Authenticity record for the document behind `token`.
    ///
    /// The only check performed is that a signature entry exists; the
    /// signature images are not validated.
    pub async fn verify(&self, token: &ShareToken) -> Result<Verification, LifecycleError> {
        let inventory = self.fetch_by_token(token).await?;
        Ok(inventory.verification()?)
    }

    async fn run(
        &self,
        key: InventoryKey,
        command: InventoryCommand,
    ) -> Result<Inventory, LifecycleError> {
        match self.store.execute(&key, &command).await {
            Ok(Some(inventory)) => Ok(inventory),
            Ok(None) => Err(match key {
                InventoryKey::Id(id) => LifecycleError::NotFound(id),
                InventoryKey::Token(_) => LifecycleError::InvalidLink,
            }),
            Err(err) => {
                let err = LifecycleError::from(err);
                if matches!(
                    err,
                    LifecycleError::Forbidden(_) | LifecycleError::Validation(_)
                ) {
                    warn!(command = command.name(), error = %err, "command rejected");
                }
                Err(err)
            }
        }
    }
}
