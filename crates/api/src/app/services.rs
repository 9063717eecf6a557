use std::sync::Arc;

use anyhow::Context;

use propinv_infra::{
    AppConfig, BlobStore, FsBlobStore, InMemoryBlobStore, InMemoryInventoryStore, InventoryStore,
    LifecycleManager, PostgresInventoryStore,
};

/// Explicitly constructed process resources shared by all handlers.
pub struct AppServices {
    pub lifecycle: LifecycleManager<Arc<dyn InventoryStore>>,
    pub blobs: Arc<dyn BlobStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn InventoryStore>, blobs: Arc<dyn BlobStore>, list_limit: usize) -> Self {
        Self {
            lifecycle: LifecycleManager::new(store).with_list_limit(list_limit),
            blobs,
        }
    }

    /// Fully in-memory wiring (dev/test).
    pub fn in_memory(list_limit: usize) -> Self {
        Self::new(
            Arc::new(InMemoryInventoryStore::new()),
            Arc::new(InMemoryBlobStore::new()),
            list_limit,
        )
    }

    /// Release store connections. Called once after the server stops.
    pub async fn shutdown(&self) {
        self.lifecycle.store().close().await;
        tracing::info!("services shut down");
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store: Arc<dyn InventoryStore> = match &config.database {
        Some(db) => {
            let store = PostgresInventoryStore::connect(&db.url, db.max_connections)
                .await
                .context("failed to connect to postgres")?;
            tracing::info!(max_connections = db.max_connections, "using postgres inventory store");
            Arc::new(store)
        }
        None => {
            tracing::info!("using in-memory inventory store");
            Arc::new(InMemoryInventoryStore::new())
        }
    };

    let blobs = FsBlobStore::open(&config.uploads_dir)
        .await
        .with_context(|| format!("failed to open uploads dir {}", config.uploads_dir.display()))?;
    tracing::info!(root = %blobs.root().display(), "using filesystem blob store");

    Ok(AppServices::new(
        store,
        Arc::new(blobs),
        config.inventory_list_limit,
    ))
}
