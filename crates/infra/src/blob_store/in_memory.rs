use std::collections::HashMap;
use std::sync::RwLock;

use super::{BlobCategory, BlobRef, BlobStore, BlobStoreError, generate_filename, is_safe_filename};

/// In-memory blob store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    inner: RwLock<HashMap<(BlobCategory, String), Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> BlobStoreError {
    BlobStoreError::Storage("lock poisoned".to_string())
}

#[async_trait::async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(
        &self,
        category: BlobCategory,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<BlobRef, BlobStoreError> {
        let filename = generate_filename(original_filename);
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert((category, filename.clone()), bytes.to_vec());
        Ok(BlobRef { category, filename })
    }

    async fn get(
        &self,
        category: BlobCategory,
        filename: &str,
    ) -> Result<Option<Vec<u8>>, BlobStoreError> {
        if !is_safe_filename(filename) {
            return Ok(None);
        }
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&(category, filename.to_string())).cloned())
    }
}
