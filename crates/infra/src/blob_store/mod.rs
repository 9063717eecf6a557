//! Blob storage for uploaded photos and documents.
//!
//! Uploads are stored under a random name that keeps the original file's
//! extension, grouped by category. Callers get back a [`BlobRef`] whose
//! [`BlobRef::path`] is the relative URL the file can be fetched from.

pub mod fs;
pub mod in_memory;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use fs::FsBlobStore;
pub use in_memory::InMemoryBlobStore;

/// Upload category; doubles as the directory / URL segment name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlobCategory {
    Photos,
    Documents,
    PropertyPhotos,
}

impl BlobCategory {
    pub const ALL: [BlobCategory; 3] = [
        BlobCategory::Photos,
        BlobCategory::Documents,
        BlobCategory::PropertyPhotos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlobCategory::Photos => "photos",
            BlobCategory::Documents => "documents",
            BlobCategory::PropertyPhotos => "property_photos",
        }
    }
}

impl core::fmt::Display for BlobCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for BlobCategory {
    type Err = BlobStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlobCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| BlobStoreError::UnknownCategory(s.to_string()))
    }
}

/// Reference to a stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    pub category: BlobCategory,
    pub filename: String,
}

impl BlobRef {
    /// Relative URL the blob is served from.
    pub fn path(&self) -> String {
        format!("/uploads/{}/{}", self.category, self.filename)
    }
}

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("unknown blob category: {0}")]
    UnknownCategory(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Byte storage for uploads.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under a freshly generated name derived from `original_filename`.
    async fn put(
        &self,
        category: BlobCategory,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<BlobRef, BlobStoreError>;

    /// Fetch a blob. Names that are not a single plain path component resolve to `None`.
    async fn get(
        &self,
        category: BlobCategory,
        filename: &str,
    ) -> Result<Option<Vec<u8>>, BlobStoreError>;
}

#[async_trait::async_trait]
impl<S> BlobStore for Arc<S>
where
    S: BlobStore + ?Sized,
{
    async fn put(
        &self,
        category: BlobCategory,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<BlobRef, BlobStoreError> {
        (**self).put(category, original_filename, bytes).await
    }

    async fn get(
        &self,
        category: BlobCategory,
        filename: &str,
    ) -> Result<Option<Vec<u8>>, BlobStoreError> {
        (**self).get(category, filename).await
    }
}

/// Extension of `original_filename`, if it has a usable one.
///
/// Only ASCII alphanumeric extensions are kept; anything else is dropped so the
/// generated name can never carry separators or control characters.
pub fn file_extension(original_filename: &str) -> Option<&str> {
    let (_, ext) = original_filename.rsplit_once('.')?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

/// Random storage name keeping the original extension.
pub fn generate_filename(original_filename: &str) -> String {
    let id = Uuid::new_v4();
    match file_extension(original_filename) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// True when `filename` is a single, plain path component.
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0'])
}
