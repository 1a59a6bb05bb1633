use crate::domain::podcast::{StorageId, UploadableFile};
use async_trait::async_trait;

/// Issues one-time upload URLs from the storage provider
#[async_trait]
pub trait UploadUrlIssuer: Send + Sync {
    async fn generate_upload_url(&self) -> Result<String, String>;
}

/// Transfers a packaged file to a previously issued upload URL
#[async_trait]
pub trait UploadExecutor: Send + Sync {
    async fn upload(&self, upload_url: &str, file: &UploadableFile) -> Result<StorageId, String>;
}

/// Turns a storage id into a fetchable URL
#[async_trait]
pub trait PlaybackUrlResolver: Send + Sync {
    /// `Ok(None)` when the provider has no file for this id
    async fn resolve_url(&self, storage_id: &StorageId) -> Result<Option<String>, String>;
}
