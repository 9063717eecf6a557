//! Infrastructure layer: document store, blob store, lifecycle orchestration, config.

pub mod blob_store;
pub mod config;
pub mod inventory_store;
pub mod lifecycle;

pub use blob_store::{BlobCategory, BlobRef, BlobStore, BlobStoreError, FsBlobStore, InMemoryBlobStore};
pub use config::{AppConfig, ConfigError, CorsOrigins, DatabaseConfig};
pub use inventory_store::{
    InMemoryInventoryStore, InventoryKey, InventoryStore, PostgresInventoryStore, StoreError,
};
pub use lifecycle::{
    InventoryUpdate, LifecycleError, LifecycleManager, ShareLink, SignatureInput,
    SignatureReceipt,
};
