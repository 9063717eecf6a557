use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::{BlobCategory, BlobRef, BlobStore, BlobStoreError, generate_filename, is_safe_filename};

/// Filesystem blob store: one directory per category under `root`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open a store rooted at `root`, creating the category directories.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, BlobStoreError> {
        let root = root.into();
        for category in BlobCategory::ALL {
            tokio::fs::create_dir_all(root.join(category.as_str())).await?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn category_dir(&self, category: BlobCategory) -> PathBuf {
        self.root.join(category.as_str())
    }
}

#[async_trait::async_trait]
impl BlobStore for FsBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()), err)]
    async fn put(
        &self,
        category: BlobCategory,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<BlobRef, BlobStoreError> {
        let filename = generate_filename(original_filename);
        let path = self.category_dir(category).join(&filename);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), "blob stored");

        Ok(BlobRef { category, filename })
    }

    #[instrument(skip(self), err)]
    async fn get(
        &self,
        category: BlobCategory,
        filename: &str,
    ) -> Result<Option<Vec<u8>>, BlobStoreError> {
        if !is_safe_filename(filename) {
            return Ok(None);
        }

        match tokio::fs::read(self.category_dir(category).join(filename)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
