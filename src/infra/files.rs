//! Filesystem-backed profile picture storage.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::config::AVATAR_SUBDIR;
use crate::errors::{AppError, AppResult};
use crate::infra::ProfilePicStore;

/// Image store rooted at `{media_dir}/avatars/`.
pub struct FsImageStore {
    base: PathBuf,
}

impl FsImageStore {
    /// Create the store, ensuring the avatar directory exists.
    pub async fn new(media_dir: &str) -> AppResult<Self> {
        let base = PathBuf::from(media_dir).join(AVATAR_SUBDIR);
        fs::create_dir_all(&base)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create media dir: {}", e)))?;

        Ok(Self { base })
    }
}

#[async_trait]
impl ProfilePicStore for FsImageStore {
    async fn save_image(&self, image: &[u8], filename: &str) -> AppResult<()> {
        fs::write(self.base.join(filename), image)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write image: {}", e)))
    }
}
